//! Well-known addresses offered as "Try:" shortcuts.

/// A labelled sample address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExampleAddress {
    pub label: &'static str,
    pub address: &'static str,
}

pub static EXAMPLE_ADDRESSES: [ExampleAddress; 2] = [
    ExampleAddress {
        label: "Wrapped SOL",
        address: "So11111111111111111111111111111111111111112",
    },
    ExampleAddress {
        label: "USDC",
        address: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
    },
];

impl ExampleAddress {
    /// Case-insensitive lookup by label; spaces and dashes are interchangeable.
    pub fn find(label: &str) -> Option<&'static ExampleAddress> {
        let wanted = normalize(label);
        EXAMPLE_ADDRESSES.iter().find(|e| normalize(e.label) == wanted)
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "-")
}
