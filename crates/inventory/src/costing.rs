use stockpot_units::CostConverter;

/// Price of a single purchase unit inside a pack.
pub fn pack_unit_cost(pack_price: f64, pack_size: f64) -> f64 {
    if pack_size <= 0.0 {
        return 0.0;
    }

    pack_price / pack_size
}

/// Derive the per-`cost_unit` price from pack purchasing data.
///
/// The amount factor from `cost_unit` to `purchase_unit` counts how
/// many purchase units make up one costing unit, so multiplying the
/// per-purchase-unit price by it prices the costing unit. When the
/// pair cannot be resolved the converter keeps the per-purchase-unit
/// price and warns once per pair, so one bad unit never sinks a batch.
pub fn unit_cost(
    pack_price: f64,
    pack_size: f64,
    purchase_unit: &str,
    cost_unit: &str,
    name: &str,
    converter: &mut CostConverter,
) -> f64 {
    let per_purchase_unit = pack_unit_cost(pack_price, pack_size);
    converter.convert(per_purchase_unit, cost_unit, purchase_unit, name)
}

/// Inflate a unit cost by trim and peel losses: usable yield is
/// `100 - wastage_pct` percent of what was bought. Wastage at or above
/// 100 keeps the uninflated cost rather than dividing by zero.
pub fn effective_unit_cost(cost_per_unit: f64, wastage_pct: f64) -> f64 {
    let yield_pct = 100.0 - wastage_pct;
    if yield_pct <= 0.0 {
        return cost_per_unit;
    }

    cost_per_unit * 100.0 / yield_pct
}
