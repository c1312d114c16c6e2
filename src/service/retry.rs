use super::cascade::{find_existing_client, ClientQuery, Phase};
use crate::directory::Directory;
use crate::models::{
    FatalLookupFailure, LookupStep, RecoveredClient, RetryInput, RetryOutcome, Trace, TraceEntry,
    RETRY_FAILED_ERROR_TYPE, RETRY_FAILED_MESSAGE,
};
use serde_json::Value;

/// 创建客户因重复报错后的重试查找
///
/// `lookup_data` 为上一步的查找结果，只读取其中的客户与证件信息，
/// 结果中原样回传。找到既有客户则返回 [`RetryOutcome::Recovered`]，流水线继续开票；
/// 否则返回需要通知的 [`RetryOutcome::Fatal`]。
pub async fn retry_lookup<D: Directory + ?Sized>(
    directory: &D,
    lookup_data: Value,
) -> RetryOutcome {
    let mut trace = Trace::new();
    trace.push(TraceEntry::info(
        LookupStep::Retry,
        "Retry lookup triggered due to duplicate error",
    ));

    let input = match RetryInput::from_lookup_data(&lookup_data) {
        Ok(input) => input,
        Err(e) => {
            trace.push(TraceEntry::failed(LookupStep::Retry, "Lookup data", e));
            RetryInput::default()
        }
    };

    let existing = find_existing_client(
        directory,
        ClientQuery::new(&input.customer, &input.document_data),
        Phase::Retry,
        &mut trace,
    )
    .await;

    // 命中但取不到主键时同样无法继续开票
    let cliente_id = existing.and_then(|client| {
        let id = client.client_id();
        if id.is_none() {
            trace.push(TraceEntry::not_found(
                LookupStep::Retry,
                "Matched client has no identifier",
            ));
        }
        id
    });

    match cliente_id {
        Some(cliente_id) => {
            tracing::info!("Recovered existing client {} after duplicate error", cliente_id);
            RetryOutcome::Recovered(RecoveredClient {
                cliente_id,
                invoice_data: lookup_data,
                recovered_from_error: true,
                debug: trace.messages(),
                trace: trace.into_entries(),
            })
        }
        None => {
            tracing::error!(
                "Retry lookup failed for order {:?}, notification required",
                input.shopify_order_number
            );
            RetryOutcome::Fatal(FatalLookupFailure {
                success: false,
                fatal_error: true,
                error_message: RETRY_FAILED_MESSAGE.to_string(),
                lookup_data,
                debug: trace.messages(),
                trace: trace.into_entries(),
                requires_notification: true,
                error_type: RETRY_FAILED_ERROR_TYPE.to_string(),
            })
        }
    }
}
