use chrono::Utc;
use sqlx::PgPool;
use tokio::time::{interval, Duration as TokioDuration};
use tracing::{error, info};

use crate::models::{CreateFeedback, FeedbackSeverity, FeedbackType, Reminder};
use crate::services::{FeedbackService, ReminderService};

/// Delivers due reminders as feedback rows and advances their schedules.
///
/// Failures are logged and skipped; the scan never stops.
#[derive(Debug, Clone)]
pub struct ReminderScheduler {
    db: PgPool,
}

impl ReminderScheduler {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Start the delivery loop (one scan per minute).
    pub fn start(&self) {
        let scheduler = self.clone();
        tokio::spawn(async move {
            let mut interval = interval(TokioDuration::from_secs(60));

            loop {
                interval.tick().await;

                match scheduler.deliver_due().await {
                    Ok(0) => {}
                    Ok(delivered) => info!(delivered, "delivered due reminders"),
                    Err(e) => error!("reminder scan failed: {e}"),
                }
            }
        });

        info!("reminder scheduler started");
    }

    /// One scan: deliver every due reminder, advancing or retiring each.
    pub async fn deliver_due(&self) -> anyhow::Result<usize> {
        let reminders = ReminderService::new(self.db.clone());
        let due = reminders.due_reminders(Utc::now()).await?;
        let mut delivered = 0;

        for reminder in &due {
            if let Err(e) = self.deliver_one(reminder).await {
                error!(reminder_id = %reminder.id, "reminder delivery failed: {e}");
                continue;
            }
            delivered += 1;
        }

        Ok(delivered)
    }

    async fn deliver_one(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let feedback = FeedbackService::new(self.db.clone());
        feedback
            .create(
                reminder.user_id,
                CreateFeedback {
                    session_id: None,
                    feedback_type: FeedbackType::Tip,
                    title: reminder.title.clone(),
                    message: reminder
                        .message
                        .clone()
                        .unwrap_or_else(|| "Time for your posture check-in.".to_string()),
                    severity: Some(FeedbackSeverity::Info),
                },
            )
            .await?;

        ReminderService::new(self.db.clone())
            .advance_schedule(reminder)
            .await?;

        Ok(())
    }
}
