use crate::symbols::reference::ReferenceSymbolTable;
use crate::table::Dataset;

pub fn rename<'a>(label: &'a str, reference: &'a ReferenceSymbolTable) -> &'a str {
    reference.current_symbol(label).unwrap_or(label)
}

#[derive(Debug, Clone)]
pub struct LegacyConversion {
    pub dataset: Dataset,
    pub renamed: Vec<(String, String)>,
}

/// Replaces deprecated symbols with their current names. Row order is kept.
pub fn convert_legacy_symbols(dataset: &Dataset, reference: &ReferenceSymbolTable) -> LegacyConversion {
    let mut out = dataset.clone();
    let mut renamed = Vec::new();
    for row in &mut out.rows {
        let current = rename(&row.label, reference);
        if current != row.label {
            let current = current.to_string();
            renamed.push((std::mem::replace(&mut row.label, current.clone()), current));
        }
    }
    LegacyConversion {
        dataset: out,
        renamed,
    }
}
