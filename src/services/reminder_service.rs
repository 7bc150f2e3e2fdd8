use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateReminder, Reminder, ReminderFrequency, UpdateReminder};

pub struct ReminderService {
    db: PgPool,
}

impl ReminderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Active reminders, soonest first.
    pub async fn get_user_reminders(&self, user_id: Uuid) -> Result<Vec<Reminder>> {
        let rows = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE user_id = $1 AND is_active
             ORDER BY scheduled_time ASC NULLS LAST",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn create_reminder(&self, user_id: Uuid, data: CreateReminder) -> Result<Reminder> {
        let row = sqlx::query_as::<_, Reminder>(
            "INSERT INTO reminders (id, user_id, title, message, frequency, scheduled_time, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.frequency)
        .bind(data.scheduled_time)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// Owner-scoped update.
    pub async fn update_reminder(
        &self,
        user_id: Uuid,
        reminder_id: Uuid,
        data: UpdateReminder,
    ) -> Result<Option<Reminder>> {
        let row = sqlx::query_as::<_, Reminder>(
            "UPDATE reminders
             SET title = COALESCE($3, title),
                 message = COALESCE($4, message),
                 frequency = COALESCE($5, frequency),
                 scheduled_time = COALESCE($6, scheduled_time),
                 is_active = COALESCE($7, is_active)
             WHERE id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(reminder_id)
        .bind(user_id)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.frequency)
        .bind(data.scheduled_time)
        .bind(data.is_active)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    /// Active reminders whose scheduled time has passed.
    pub async fn due_reminders(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>> {
        let rows = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders
             WHERE is_active AND scheduled_time IS NOT NULL AND scheduled_time <= $1
             ORDER BY scheduled_time ASC",
        )
        .bind(now)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Advance a delivered reminder to its next occurrence, or retire it.
    pub async fn advance_schedule(&self, reminder: &Reminder) -> Result<()> {
        match next_occurrence(reminder.frequency, reminder.scheduled_time) {
            Some(next) => {
                sqlx::query("UPDATE reminders SET scheduled_time = $2 WHERE id = $1")
                    .bind(reminder.id)
                    .bind(next)
                    .execute(&self.db)
                    .await?;
            }
            None => {
                sqlx::query("UPDATE reminders SET is_active = FALSE WHERE id = $1")
                    .bind(reminder.id)
                    .execute(&self.db)
                    .await?;
            }
        }

        Ok(())
    }
}

/// Next delivery time for a repeating reminder; None retires it.
pub fn next_occurrence(
    frequency: ReminderFrequency,
    scheduled_time: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    let current = scheduled_time?;
    match frequency {
        ReminderFrequency::Daily => Some(current + Duration::days(1)),
        ReminderFrequency::Weekly => Some(current + Duration::days(7)),
        ReminderFrequency::Once | ReminderFrequency::Custom => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_daily_advances_one_day() {
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(ReminderFrequency::Daily, Some(at)),
            Some(at + Duration::days(1))
        );
    }

    #[test]
    fn test_weekly_advances_seven_days() {
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(ReminderFrequency::Weekly, Some(at)),
            Some(at + Duration::days(7))
        );
    }

    #[test]
    fn test_once_and_custom_retire() {
        let at = Utc::now();
        assert_eq!(next_occurrence(ReminderFrequency::Once, Some(at)), None);
        assert_eq!(next_occurrence(ReminderFrequency::Custom, Some(at)), None);
    }

    #[test]
    fn test_unscheduled_reminder_never_advances() {
        assert_eq!(next_occurrence(ReminderFrequency::Daily, None), None);
    }
}
