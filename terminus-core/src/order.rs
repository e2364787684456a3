use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A committed order with its tickets, in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub order_id: Uuid,
    pub cargo: i32,
    pub seat: i32,
}

/// A requested ticket, before validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TicketSpec {
    pub trip_id: Uuid,
    pub cargo: i32,
    pub seat: i32,
}

/// 1-based page request for order listings.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub count: i64,
    pub results: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_offset_is_zero_based() {
        let page = PageRequest {
            page: 1,
            page_size: 10,
        };
        assert_eq!(page.offset(), 0);

        let page = PageRequest {
            page: 3,
            page_size: 10,
        };
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let page = PageRequest {
            page: 0,
            page_size: 10,
        };
        assert_eq!(page.offset(), 0);
    }
}
