use super::cascade::{find_existing_client, ClientQuery, Phase};
use super::numbering::prepare_numbering;
use crate::directory::Directory;
use crate::models::{CustomerRecord, LookupResult, Trace};

/// 客户查找 + 开票准备
///
/// 先按邮箱、税号、名称查找既有客户，再查询销售点与号段计算下一张发票号。
/// 目录调用失败只会记录在 `debug`/`trace` 中，本函数不会返回错误。
pub async fn resolve_client<D: Directory + ?Sized>(
    directory: &D,
    record: &CustomerRecord,
    access_token: &str,
) -> LookupResult {
    let mut trace = Trace::new();

    let existing = find_existing_client(
        directory,
        ClientQuery::new(&record.customer, &record.document_data),
        Phase::Initial,
        &mut trace,
    )
    .await;

    let letter = record.invoice_letter();
    let numbering = prepare_numbering(directory, letter, &mut trace).await;

    // 透传字段不得覆盖本步骤写出的字段
    let mut extra = record.extra.clone();
    extra.retain(|key, _| !LookupResult::OWN_FIELDS.contains(&key.as_str()));

    tracing::info!(
        "Client lookup finished: exists={}, documento={}",
        existing.is_some(),
        numbering.document_number()
    );

    LookupResult {
        client_exists: existing.is_some(),
        existing_client_id: existing.as_ref().and_then(|c| c.client_id()),
        existing_client_name: existing.as_ref().and_then(|c| c.nombre.clone()),
        customer: record.customer.clone(),
        document_data: record.document_data.clone(),
        fiscal_category: record.fiscal_category.clone(),
        invoice_type: numbering.letter.clone(),
        tipo_comprobante: numbering.tipo_comprobante(),
        punto_venta_id: numbering.point_of_sale_id.clone(),
        punto_venta_codigo: numbering.point_of_sale_code.clone(),
        numero_documento: numbering.document_number(),
        transaccion_producto_items: record.transaccion_producto_items.clone(),
        product_summary: record.product_summary.clone(),
        order_total: record.order_total.clone(),
        shopify_order_id: record.shopify_order_id.clone(),
        shopify_order_number: record.shopify_order_number.clone(),
        currency: record.currency.clone(),
        access_token: access_token.to_string(),
        invoice_legend: record.invoice_legend.clone(),
        debug: trace.messages(),
        trace: trace.into_entries(),
        extra,
    }
}
