use std::collections::BTreeMap;
use std::collections::HashMap;

use super::extract::Requirement;
use super::repo::{NewShoppingItem, PantryItem, ShoppingListItem};

/// Lowercase, trim, and strip common plural endings. The rules fire in
/// order: `ies -> y`, `oes -> drop es`, `ses -> drop es`, then a trailing
/// non-`ss` `s` is dropped. Heuristic only: non-plural words ending in a
/// single `s` ("gas") get mis-stripped, which matches the behavior the
/// shopping-list dedup has always had. Kept as one named function so a real
/// stemmer could replace it without touching call sites.
pub fn normalize_name(name: &str) -> String {
    let n = name.trim().to_lowercase();
    if let Some(stem) = n.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if n.ends_with("oes") || n.ends_with("ses") {
        return n[..n.len() - 2].to_string();
    }
    if n.ends_with('s') && !n.ends_with("ss") {
        return n[..n.len() - 1].to_string();
    }
    n
}

/// Fuzzy "same food" test used against the shopping list: exact match after
/// normalization, or either name (raw or normalized) contained in the other.
pub fn same_food(a: &str, b: &str) -> bool {
    let ra = a.trim().to_lowercase();
    let rb = b.trim().to_lowercase();
    if ra.is_empty() || rb.is_empty() {
        return false;
    }
    let na = normalize_name(&ra);
    let nb = normalize_name(&rb);
    na == nb
        || ra.contains(&rb)
        || rb.contains(&ra)
        || na.contains(&nb)
        || nb.contains(&na)
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Pure diff of required ingredients against pantry and shopping-list
/// snapshots. Returns the items that should be added; persistence is the
/// caller's problem.
///
/// Pantry availability is the MAX of two independent tallies, one keyed by
/// the exact lowercased name and one by the normalized name. Quantities
/// entered under different spellings of the same food are therefore not
/// summed together; the larger tally wins. Long-standing behavior, kept
/// as is.
pub fn reconcile(
    requirements: &BTreeMap<String, Requirement>,
    pantry: &[PantryItem],
    shopping: &[ShoppingListItem],
) -> Vec<NewShoppingItem> {
    let mut by_exact: HashMap<String, f64> = HashMap::new();
    let mut by_norm: HashMap<String, f64> = HashMap::new();
    for item in pantry {
        let exact = item.name.trim().to_lowercase();
        *by_norm.entry(normalize_name(&exact)).or_default() += item.quantity;
        *by_exact.entry(exact).or_default() += item.quantity;
    }

    let mut additions = Vec::new();
    for (name, req) in requirements {
        let available = by_exact
            .get(name)
            .copied()
            .unwrap_or(0.0)
            .max(by_norm.get(&normalize_name(name)).copied().unwrap_or(0.0));
        let shortfall = req.quantity - available;
        if shortfall <= 0.0 {
            continue;
        }
        if shopping.iter().any(|s| same_food(&s.name, name)) {
            continue;
        }
        additions.push(NewShoppingItem {
            name: title_case(name),
            category: req.category.as_str().to_string(),
            quantity: shortfall.ceil() as i32,
        });
    }
    additions
}
