//! Splitting a `From` header into a display name and an address.

/// The sender of an email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sender {
    /// The display name, empty when the header only has an address.
    pub name: String,
    /// The email address, empty when the header is empty.
    pub address: String,
}

/// Parse a mailbox such as `Jane Doe <jane@example.com>`, `"Doe, Jane" <jane@example.com>`,
/// `jane@example.com (Jane Doe)` or a bare `jane@example.com`.
///
/// Never fails: text that does not look like any of these forms is taken as the address.
pub fn parse_sender(from: &str) -> Sender {
    let from = from.trim();

    if let Some(open) = from.rfind('<') {
        if let Some(length) = from[open..].find('>') {
            return Sender {
                name: unquote(from[..open].trim()),
                address: from[open + 1..open + length].trim().to_owned(),
            };
        }
    }

    if let (Some(open), true) = (from.find('('), from.ends_with(')')) {
        return Sender {
            name: from[open + 1..from.len() - 1].trim().to_owned(),
            address: from[..open].trim().to_owned(),
        };
    }

    Sender {
        name: String::new(),
        address: from.to_owned(),
    }
}

fn unquote(name: &str) -> String {
    match name
        .strip_prefix('"')
        .and_then(|name| name.strip_suffix('"'))
    {
        Some(quoted) => quoted.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => name.to_owned(),
    }
}
