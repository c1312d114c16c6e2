use super::cache::ClientListCache;
use super::matcher::{find_by_name, find_by_tax_id, MatchMode, NameQuery};
use crate::directory::Directory;
use crate::models::{ClientRecord, Customer, DocumentData, LookupStep, Trace, TraceEntry};

/// 查找阶段: 首次查找或创建失败后的重试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initial,
    Retry,
}

impl Phase {
    fn mode(self) -> MatchMode {
        match self {
            Self::Initial => MatchMode::Standard,
            Self::Retry => MatchMode::Permissive,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Initial => "",
            Self::Retry => " on retry",
        }
    }

    fn error_label(self, initial: &'static str, retry: &'static str) -> &'static str {
        match self {
            Self::Initial => initial,
            Self::Retry => retry,
        }
    }
}

/// 查找条件
#[derive(Debug, Clone, Copy)]
pub struct ClientQuery<'a> {
    pub customer: &'a Customer,
    pub document: &'a DocumentData,
}

impl<'a> ClientQuery<'a> {
    pub fn new(customer: &'a Customer, document: &'a DocumentData) -> Self {
        Self { customer, document }
    }

    fn email(&self) -> Option<&'a str> {
        self.customer.email.as_deref().filter(|e| !e.is_empty())
    }

    fn document_number(&self) -> Option<&'a str> {
        self.document.document.number.as_deref().filter(|n| !n.is_empty())
    }
}

fn display_id(client: &ClientRecord) -> String {
    client
        .client_id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "undefined".to_string())
}

/// 邮箱 → 税号 → 名称 依次查找，命中即停止
///
/// 每一步的目录调用失败都只记录到追踪日志，不影响后续步骤。
pub async fn find_existing_client<D: Directory + ?Sized>(
    directory: &D,
    query: ClientQuery<'_>,
    phase: Phase,
    trace: &mut Trace,
) -> Option<ClientRecord> {
    let suffix = phase.suffix();

    // 1. 邮箱精确查找
    if let Some(email) = query.email() {
        match directory.search_clients_by_email(email).await {
            Ok(found) => match found.into_iter().next() {
                Some(client) => {
                    trace.push(TraceEntry::matched(
                        LookupStep::Email,
                        client.client_id(),
                        None,
                        format!("Found client by email{}: {}", suffix, display_id(&client)),
                    ));
                    return Some(client);
                }
                None => trace.push(TraceEntry::not_found(
                    LookupStep::Email,
                    format!("No client found by email{}: {}", suffix, email),
                )),
            },
            Err(e) => trace.push(TraceEntry::failed(
                LookupStep::Email,
                phase.error_label("Email search", "Retry email search"),
                e,
            )),
        }
    }

    let mut cache = ClientListCache::new(directory);

    // 2. 税号查找
    if let Some(number) = query.document_number() {
        match cache.get().await {
            Ok(clients) => match find_by_tax_id(clients, number) {
                Some(client) => {
                    trace.push(TraceEntry::matched(
                        LookupStep::TaxId,
                        client.client_id(),
                        None,
                        format!("Found client by CUIT{}: {}", suffix, display_id(client)),
                    ));
                    return Some(client.clone());
                }
                None => trace.push(TraceEntry::not_found(
                    LookupStep::TaxId,
                    format!("No client found by CUIT{}: {}", suffix, number),
                )),
            },
            Err(e) => trace.push(TraceEntry::failed(
                LookupStep::TaxId,
                phase.error_label("CUIT search", "Retry CUIT search"),
                e,
            )),
        }
    }

    // 3. 名称查找
    let name_query = NameQuery::from_customer(query.customer)?;
    let clients = match cache.get().await {
        Ok(clients) => clients,
        Err(e) => {
            trace.push(TraceEntry::failed(
                LookupStep::Name,
                phase.error_label("Name search", "Retry name search"),
                e,
            ));
            return None;
        }
    };

    let searching = match phase {
        Phase::Initial => format!("Searching by name: \"{}\"", name_query.full_name),
        Phase::Retry => format!(
            "Searching for name: \"{}\" (first: \"{}\", last: \"{}\")",
            name_query.full_name, name_query.first_name, name_query.last_name
        ),
    };
    trace.push(TraceEntry::info(LookupStep::Name, searching));

    match find_by_name(clients, &name_query, phase.mode()) {
        Some((client, rule)) => {
            if phase == Phase::Retry {
                trace.push(TraceEntry::info(
                    LookupStep::Name,
                    rule.describe(client, &name_query.full_name),
                ));
            }
            trace.push(TraceEntry::matched(
                LookupStep::Name,
                client.client_id(),
                Some(rule.as_str()),
                format!(
                    "Found client by name{}: {} ({})",
                    suffix,
                    display_id(client),
                    client.nombre.as_deref().unwrap_or_default()
                ),
            ));
            Some(client.clone())
        }
        None => {
            let message = match phase {
                Phase::Initial => format!("No client found by name: \"{}\"", name_query.full_name),
                Phase::Retry => {
                    let sample: Vec<&str> = clients
                        .iter()
                        .take(5)
                        .map(|c| c.nombre.as_deref().unwrap_or_default())
                        .collect();
                    format!("Name search failed. Available clients: {}...", sample.join(", "))
                }
            };
            trace.push(TraceEntry::not_found(LookupStep::Name, message));
            None
        }
    }
}
