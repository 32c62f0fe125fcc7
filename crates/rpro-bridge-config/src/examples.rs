// crates/rpro-bridge-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs, tests, and `config example`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for bridge configuration. The output is static and is
//! checked by tests to load and validate cleanly.

/// Returns a canonical example `rpro-bridge.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[scope]
sbs_no = "001"

[csv]
delimiter = ","
output_dir = "Salida"

[sid_generator]
item_sid_mode = "upc"
style_sid_mode = "desc1"

[database]
path = "rpro-bridge.db"
busy_timeout_ms = 5000
access = "read_only"

[inventory]
template = ["local_upc", "description1", "description2", "dcs_code", "vend_code", "cost", "udf_1"]

[[inventory.catalog]]
rpro = "local_upc"
visual = "UPC"
section = "INVN_SBS"
len = 18

[[inventory.catalog]]
rpro = "description1"
visual = "Descripcion 1"
section = "INVN_SBS"
len = 30

[[inventory.catalog]]
rpro = "description2"
visual = "Descripcion 2"
section = "INVN_SBS"
len = 30

[[inventory.catalog]]
rpro = "dcs_code"
visual = "DCS"
section = "INVN_SBS"
len = 9

[[inventory.catalog]]
rpro = "vend_code"
visual = "Proveedor"
section = "INVN_SBS"
len = 6

[[inventory.catalog]]
rpro = "cost"
visual = "Costo"
section = "INVN_SBS"

[[inventory.catalog]]
rpro = "udf_1"
visual = "Marca"
section = "INVN_SBS_SUPPL"
len = 20

[transfer_orders]
header = ["sbs_no", "orig_store_no", "note"]
detail = ["upc", "ord_qty", "price"]

[[transfer_orders.catalog]]
rpro = "sbs_no"
visual = "Subsidiaria"
section = "TO"
len = 3

[[transfer_orders.catalog]]
rpro = "upc"
visual = "UPC"
section = "INVN_BASE_ITEM"
len = 18

[audit]
sink = "stderr"
"#,
    )
}
