use crate::domain::{Priority, Ticket, TicketId, TicketStatus};
use chrono::{Duration, Utc};

/// Seed data for the mock API, covering every status and priority
pub fn demo_tickets() -> Vec<Ticket> {
    let now = Utc::now();

    let mut tickets = vec![
        Ticket::new(
            TicketId::new(1),
            "Anna Kowalska",
            "Cannot log in to the customer portal",
            "Password reset emails never arrive, checked spam folder already.",
            Priority::High,
            now - Duration::days(6),
        ),
        Ticket::new(
            TicketId::new(2),
            "James Miller",
            "Invoice PDF shows wrong company address",
            "The billing address was updated last month but invoices still use the old one.",
            Priority::Medium,
            now - Duration::days(4),
        ),
        Ticket::new(
            TicketId::new(3),
            "Piotr Nowak",
            "Feature request: export report as CSV",
            "Monthly usage report is only available as PDF, we need CSV for our tooling.",
            Priority::Low,
            now - Duration::days(3),
        ),
        Ticket::new(
            TicketId::new(4),
            "Maria Garcia",
            "Mobile app crashes on startup",
            "Crashes immediately after the splash screen since the last update, Android 14.",
            Priority::High,
            now - Duration::days(2),
        ),
        Ticket::new(
            TicketId::new(5),
            "Tomasz Wisniewski",
            "Question about plan limits",
            "How many seats are included in the team plan and what happens over the limit?",
            Priority::Low,
            now - Duration::hours(8),
        ),
    ];

    tickets[1].set_status(TicketStatus::InProgress);
    tickets[2].set_status(TicketStatus::Closed);
    tickets[3].set_status(TicketStatus::InProgress);

    tickets
}
