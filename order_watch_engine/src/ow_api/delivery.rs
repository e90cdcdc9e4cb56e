use log::*;

use crate::{
    helpers::split_message,
    traits::{Notifier, NotifierError},
};

/// Deliver `text` through `notifier`, split into chunks no longer than the notifier's limit.
///
/// Chunks are sent one at a time, in order. The first failure aborts delivery. Empty text is never sent.
/// Returns the number of chunks delivered.
pub async fn deliver_message<N: Notifier>(notifier: &N, text: &str) -> Result<usize, NotifierError> {
    if text.is_empty() {
        debug!("📬️ Nothing to deliver");
        return Ok(0);
    }
    let chunks = split_message(text, notifier.max_message_len());
    let count = chunks.len();
    for (i, chunk) in chunks.into_iter().enumerate() {
        trace!("📬️ Delivering chunk {} of {count}", i + 1);
        notifier.deliver(chunk).await.map_err(|e| {
            error!("📬️ Delivery of chunk {} of {count} failed. {e}", i + 1);
            e
        })?;
    }
    info!("📬️ Delivered notification in {count} chunk(s)");
    Ok(count)
}
