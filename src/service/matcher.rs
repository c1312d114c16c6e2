use super::normalize::{digits_only, normalize_opt};
use crate::models::{ClientRecord, Customer};

/// 名称比对的严格程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// 首次查找: 全名精确匹配 + 名/姓匹配
    Standard,
    /// 重试查找: 额外允许 nombre 双向包含匹配
    Permissive,
}

/// 命中的名称规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    Nombre,
    RazonSocial,
    FirstAndLastName,
    PartialNombre,
}

impl NameRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nombre => "nombre",
            Self::RazonSocial => "razon_social",
            Self::FirstAndLastName => "first_and_last_name",
            Self::PartialNombre => "partial_nombre",
        }
    }

    /// 重试查找中记录的命中说明
    pub fn describe(self, client: &ClientRecord, search_name: &str) -> String {
        let show = |v: &Option<String>| v.clone().unwrap_or_default();
        match self {
            Self::Nombre => format!("Exact match on nombre: \"{}\"", show(&client.nombre)),
            Self::RazonSocial => {
                format!("Exact match on razonSocial: \"{}\"", show(&client.razon_social))
            }
            Self::FirstAndLastName => format!(
                "Match on primerNombre + primerApellido: \"{} {}\"",
                show(&client.primer_nombre),
                show(&client.primer_apellido)
            ),
            Self::PartialNombre => format!(
                "Partial match on nombre: \"{}\" contains/in \"{}\"",
                show(&client.nombre),
                search_name
            ),
        }
    }
}

/// 包含匹配两侧的最小长度 (不含)
const MIN_PARTIAL_LEN: usize = 3;

/// 归一化后的名称查询条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
}

impl NameQuery {
    /// 全名为空 (或归一化后为空) 时不做名称查找
    pub fn from_customer(customer: &Customer) -> Option<Self> {
        let full_name = normalize_opt(customer.full_name.as_deref());
        if full_name.is_empty() {
            return None;
        }
        Some(Self {
            full_name,
            first_name: normalize_opt(customer.nombre.as_deref()),
            last_name: normalize_opt(customer.apellido.as_deref()),
        })
    }

    /// 判断单个候选客户命中的第一条规则
    pub fn matches(&self, client: &ClientRecord, mode: MatchMode) -> Option<NameRule> {
        let nombre = normalize_opt(client.nombre.as_deref());
        if nombre == self.full_name {
            return Some(NameRule::Nombre);
        }
        if normalize_opt(client.razon_social.as_deref()) == self.full_name {
            return Some(NameRule::RazonSocial);
        }
        if !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && normalize_opt(client.primer_nombre.as_deref()) == self.first_name
            && normalize_opt(client.primer_apellido.as_deref()) == self.last_name
        {
            return Some(NameRule::FirstAndLastName);
        }
        if mode == MatchMode::Permissive && is_partial_match(&nombre, &self.full_name) {
            return Some(NameRule::PartialNombre);
        }
        None
    }
}

/// 双向包含匹配，两侧都必须超过 3 个字符
pub fn is_partial_match(candidate: &str, search: &str) -> bool {
    candidate.chars().count() > MIN_PARTIAL_LEN
        && search.chars().count() > MIN_PARTIAL_LEN
        && (candidate.contains(search) || search.contains(candidate))
}

/// 按名称查找第一个命中的客户
pub fn find_by_name<'a>(
    clients: &'a [ClientRecord],
    query: &NameQuery,
    mode: MatchMode,
) -> Option<(&'a ClientRecord, NameRule)> {
    clients
        .iter()
        .find_map(|c| query.matches(c, mode).map(|rule| (c, rule)))
}

/// 按税号查找: 候选 CUIT 去除非数字字符后与单据号比较
pub fn find_by_tax_id<'a>(
    clients: &'a [ClientRecord],
    document_number: &str,
) -> Option<&'a ClientRecord> {
    let wanted = digits_only(document_number);
    if wanted.is_empty() {
        return None;
    }
    clients
        .iter()
        .find(|c| c.cuit.as_deref().map(digits_only).as_deref() == Some(wanted.as_str()))
}
