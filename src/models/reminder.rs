use crate::entities::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    /// A confirmed rental is due to start.
    Start,
    /// An active rental is due to end.
    End,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReminderResponse {
    /// Id of the order item the reminder points at.
    pub id: Uuid,
    pub product_name: String,
    pub reminder_type: ReminderType,
    /// The start or end date the reminder counts down to.
    pub date: DateTime<Utc>,
    /// Hours until `date`, rounded to one decimal place.
    pub hours_remaining: f64,
    pub order_id: Uuid,
    pub status: OrderStatus,
    /// Renter identity, only populated for admin requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReminderFeedResponse {
    pub reminders: Vec<ReminderResponse>,
    pub count: usize,
}
