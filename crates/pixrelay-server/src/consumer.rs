//! Queue consumer: receives notification messages, runs the relay pipeline,
//! and acknowledges benign terminal outcomes. Fatal errors leave the message
//! to the queue's redelivery policy; poison messages are the queue's
//! dead-letter concern, not ours.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::types::Message;

use pixrelay_core::RelayConfig;
use pixrelay_pipeline::RelayPipeline;

/// Long-poll wait per receive call.
const WAIT_TIME_SECONDS: i32 = 20;
const MAX_MESSAGES: i32 = 10;
const RECEIVE_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Run the consumer loop until a shutdown signal arrives.
pub async fn run(config: &RelayConfig, pipeline: Arc<RelayPipeline>) -> Result<()> {
    let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let client = aws_sdk_sqs::Client::new(&aws_config);

    tracing::info!(queue_url = %config.queue_url, "Relay consumer started");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received, stopping consumer");
                return Ok(());
            }
            received = receive_batch(&client, &config.queue_url) => {
                match received {
                    Ok(messages) => {
                        for message in messages {
                            handle_message(&client, &config.queue_url, &pipeline, message).await;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Receive failed, will retry");
                        tokio::time::sleep(RECEIVE_RETRY_DELAY).await;
                    }
                }
            }
        }
    }
}

async fn receive_batch(client: &aws_sdk_sqs::Client, queue_url: &str) -> Result<Vec<Message>> {
    let output = client
        .receive_message()
        .queue_url(queue_url)
        .max_number_of_messages(MAX_MESSAGES)
        .wait_time_seconds(WAIT_TIME_SECONDS)
        .send()
        .await?;

    Ok(output.messages.unwrap_or_default())
}

async fn handle_message(
    client: &aws_sdk_sqs::Client,
    queue_url: &str,
    pipeline: &RelayPipeline,
    message: Message,
) {
    let Some(body) = message.body() else {
        tracing::warn!("Received message without body, dropping");
        acknowledge(client, queue_url, &message).await;
        return;
    };

    match pipeline.handle(body).await {
        Ok(outcome) => {
            tracing::info!(outcome = ?outcome, "Relay invocation finished");
            acknowledge(client, queue_url, &message).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Relay invocation failed, leaving message for redelivery");
        }
    }
}

async fn acknowledge(client: &aws_sdk_sqs::Client, queue_url: &str, message: &Message) {
    let Some(receipt) = message.receipt_handle() else {
        return;
    };

    if let Err(e) = client
        .delete_message()
        .queue_url(queue_url)
        .receipt_handle(receipt)
        .send()
        .await
    {
        tracing::warn!(error = %e, "Failed to delete message after processing");
    }
}
