/// Gas price every scenario fee is derived from.
pub const DEFAULT_GAS_PRICE: &str = "0.025cony";

/// Per-action gas limits, matching what the chain charges for each
/// message shape.
pub const UPLOAD_GAS: u64 = 1_500_000;
pub const INSTANTIATE_GAS: u64 = 500_000;
pub const EXECUTE_GAS: u64 = 150_000;

/// Executions that fan out a submessage to a second contract.
pub const HEAVY_EXECUTE_GAS: u64 = 200_000;
