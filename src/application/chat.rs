use crate::application::catalog::{fetch_all_articles, DEFAULT_PAGE_CAP};
use crate::domain::error::DomainError;
use crate::domain::ports::chat_gateway::{ChatGateway, ChatMessage, ChatRole};
use crate::domain::ports::inventory_api::InventoryApi;
use crate::domain::ports::local_store::ChatLogStore;
use crate::domain::values::severity::AlertSeverity;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Conversation turns threaded into each completion request.
const HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    /// Whether the reply (or the alert situation) warrants nudging the
    /// user toward a purchase order.
    pub should_create_po: bool,
    pub alerts_count: usize,
}

/// The inventory assistant: current catalog and alert data is serialized
/// into the system prompt, the conversation log provides history, and the
/// gateway does the rest.
pub struct ChatUseCase {
    api: Arc<dyn InventoryApi>,
    gateway: Arc<dyn ChatGateway>,
    log: Arc<dyn ChatLogStore>,
}

impl ChatUseCase {
    pub fn new(
        api: Arc<dyn InventoryApi>,
        gateway: Arc<dyn ChatGateway>,
        log: Arc<dyn ChatLogStore>,
    ) -> Self {
        Self { api, gateway, log }
    }

    pub async fn ask(&self, message: &str) -> Result<ChatReply, DomainError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::Validation("Message is required".into()));
        }

        let articles = fetch_all_articles(self.api.as_ref(), DEFAULT_PAGE_CAP).await?;
        let alerts = self.api.list_stock_alerts(true).await?;
        debug!(
            articles = articles.len(),
            alerts = alerts.len(),
            gateway = self.gateway.name(),
            "assembling chat context"
        );

        let context = json!({
            "articles": articles.iter().map(|a| json!({
                "id": a.id,
                "sku": a.sku,
                "name": a.name,
                "category": a.id_category,
                "supplier": a.id_supplier,
                "stockroom": a.id_stockroom,
                "stock": a.stock,
                "unit_cost": a.unit_cost,
                "reorder_point": a.reorder_point,
                "lead_time_days": a.lead_time,
            })).collect::<Vec<_>>(),
            "stock_alerts": alerts,
        });

        let system_prompt = format!(
            "You are an inventory management expert. Respond in English.\n\n\
             You have access to the following inventory data:\n{}\n\n\
             Answer questions about:\n\
             - Current product stock\n\
             - Products with low stock (active alerts)\n\
             - Supplier information\n\
             - Product categories\n\
             - Sales analysis and forecasts\n\
             - Lead times\n\n\
             If you detect products with critical stock (less than 10 days coverage) \
             or high/medium severity alerts, mention at the end: \
             \"I recommend creating a purchase order for these products.\"\n\n\
             Be concise, clear, and helpful.",
            serde_json::to_string_pretty(&context)
                .map_err(|e| DomainError::Parse(e.to_string()))?
        );

        let mut messages = vec![ChatMessage::new(ChatRole::System, system_prompt)];
        for turn in self.log.recent(HISTORY_LIMIT)? {
            messages.push(ChatMessage::new(turn.role, turn.content));
        }
        messages.push(ChatMessage::new(ChatRole::User, message));

        let response = self.gateway.complete(&messages).await?;

        let has_urgent_alert = alerts
            .iter()
            .any(|a| matches!(a.severity, AlertSeverity::High | AlertSeverity::Medium));
        let should_create_po =
            response.to_lowercase().contains("purchase order") || has_urgent_alert;

        self.log.append(ChatRole::User, message)?;
        self.log.append(ChatRole::Assistant, &response)?;

        Ok(ChatReply {
            response,
            should_create_po,
            alerts_count: alerts.len(),
        })
    }

    pub fn clear_history(&self) -> Result<(), DomainError> {
        self.log.clear()
    }
}
