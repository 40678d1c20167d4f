use a11yfix_dom::MarkupTree;
use uuid::Uuid;

// Deterministic ids: v5(namespace, stable key).
const NAMESPACE: Uuid = Uuid::from_bytes([
    0x7a, 0x11, 0x9f, 0x1c, 0x3e, 0x52, 0x4d, 0x0b, 0x9a, 0x6e, 0x21, 0xc4, 0x58, 0xd3, 0x0f,
    0x6b,
]);

/// First 8 hex digits of the v5 uuid for `key`.
pub fn stable_suffix(key: &str) -> String {
    let mut s = Uuid::new_v5(&NAMESPACE, key.as_bytes()).simple().to_string();
    s.truncate(8);
    s
}

pub fn id_in_use<T: MarkupTree>(tree: &T, id: &str) -> bool {
    tree.query_all("[id]")
        .map(|nodes| nodes.iter().any(|n| tree.attr(*n, "id") == Some(id)))
        .unwrap_or(false)
}

/// `<base>-<suffix>` that no element in the tree currently uses.
pub fn fresh_id<T: MarkupTree>(tree: &T, base: &str, key: &str) -> String {
    let mut attempt = 0u32;
    loop {
        let salted = if attempt == 0 {
            key.to_string()
        } else {
            format!("{key}#{attempt}")
        };
        let candidate = format!("{base}-{}", stable_suffix(&salted));
        if !id_in_use(tree, &candidate) {
            return candidate;
        }
        attempt += 1;
    }
}
