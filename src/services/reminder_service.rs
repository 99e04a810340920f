use crate::entities::{
    OrderStatus, order_entity as orders, order_item_entity as order_items,
    product_entity as products, user_entity as users,
};
use crate::error::AppResult;
use crate::models::*;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QuerySelect,
    RelationTrait,
};
use uuid::Uuid;

/// How far ahead the feed looks.
const WINDOW_HOURS: i64 = 24;

#[derive(Debug, sea_orm::FromQueryResult)]
struct ReminderRow {
    item_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    order_id: Uuid,
    status: OrderStatus,
    product_name: String,
    user_name: String,
    user_email: String,
}

#[derive(Clone)]
pub struct ReminderService {
    pool: DatabaseConnection,
}

impl ReminderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Reminders for rentals starting or ending within the next 24 hours.
    /// Admins see the whole book plus renter identity, customers only their
    /// own orders. Pure read, any call frequency is fine.
    pub async fn upcoming(&self, actor: &AuthUser) -> AppResult<ReminderFeedResponse> {
        self.upcoming_at(actor, Utc::now()).await
    }

    /// Same as [`upcoming`](Self::upcoming) with an injected clock.
    pub async fn upcoming_at(
        &self,
        actor: &AuthUser,
        now: DateTime<Utc>,
    ) -> AppResult<ReminderFeedResponse> {
        let until = now + Duration::hours(WINDOW_HOURS);

        let mut query = order_items::Entity::find()
            .select_only()
            .column_as(order_items::Column::Id, "item_id")
            .column_as(order_items::Column::StartDate, "start_date")
            .column_as(order_items::Column::EndDate, "end_date")
            .column_as(orders::Column::Id, "order_id")
            .column_as(orders::Column::Status, "status")
            .column_as(products::Column::ModelName, "product_name")
            .column_as(users::Column::Name, "user_name")
            .column_as(users::Column::Email, "user_email")
            .join(JoinType::InnerJoin, order_items::Relation::Orders.def())
            .join(JoinType::InnerJoin, order_items::Relation::Products.def())
            .join(JoinType::InnerJoin, orders::Relation::Users.def())
            .filter(orders::Column::Status.is_in([OrderStatus::Confirmed, OrderStatus::Active]))
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(order_items::Column::StartDate.gte(now))
                            .add(order_items::Column::StartDate.lt(until)),
                    )
                    .add(
                        Condition::all()
                            .add(order_items::Column::EndDate.gte(now))
                            .add(order_items::Column::EndDate.lt(until)),
                    ),
            );
        if !actor.is_admin() {
            query = query.filter(orders::Column::UserId.eq(actor.id));
        }

        let rows = query.into_model::<ReminderRow>().all(&self.pool).await?;
        let reminders = build_reminders(rows, now, until, actor.is_admin());
        Ok(ReminderFeedResponse {
            count: reminders.len(),
            reminders,
        })
    }
}

fn in_window(at: DateTime<Utc>, now: DateTime<Utc>, until: DateTime<Utc>) -> bool {
    at >= now && at < until
}

fn hours_remaining(now: DateTime<Utc>, event: DateTime<Utc>) -> f64 {
    let hours = (event - now).num_milliseconds() as f64 / 3_600_000.0;
    (hours * 10.0).round() / 10.0
}

/// Turns joined item rows into reminder entries, soonest first. Confirmed
/// orders remind about the upcoming start, active orders about the upcoming
/// end; the two checks are independent.
fn build_reminders(
    rows: Vec<ReminderRow>,
    now: DateTime<Utc>,
    until: DateTime<Utc>,
    include_renter: bool,
) -> Vec<ReminderResponse> {
    let mut reminders = Vec::new();
    for row in rows {
        if row.status == OrderStatus::Confirmed && in_window(row.start_date, now, until) {
            reminders.push(reminder_entry(
                &row,
                ReminderType::Start,
                row.start_date,
                now,
                include_renter,
            ));
        }
        if row.status == OrderStatus::Active && in_window(row.end_date, now, until) {
            reminders.push(reminder_entry(
                &row,
                ReminderType::End,
                row.end_date,
                now,
                include_renter,
            ));
        }
    }
    reminders.sort_by(|a, b| a.hours_remaining.total_cmp(&b.hours_remaining));
    reminders
}

fn reminder_entry(
    row: &ReminderRow,
    reminder_type: ReminderType,
    date: DateTime<Utc>,
    now: DateTime<Utc>,
    include_renter: bool,
) -> ReminderResponse {
    ReminderResponse {
        id: row.item_id,
        product_name: row.product_name.clone(),
        reminder_type,
        date,
        hours_remaining: hours_remaining(now, date),
        order_id: row.order_id,
        status: row.status.clone(),
        user_name: include_renter.then(|| row.user_name.clone()),
        user_email: include_renter.then(|| row.user_email.clone()),
    }
}
