use anyhow::Result;

use stockpot_units::{all_units, find_unit, is_volume_unit, is_weight_unit};

/// Print the unit catalog grouped by family, in catalog order.
pub fn run() -> Result<()> {
    let units = all_units();

    println!("weight:");
    for key in units.iter().filter(|key| is_weight_unit(key)) {
        print_unit(key);
    }

    println!("volume:");
    for key in units.iter().filter(|key| is_volume_unit(key)) {
        print_unit(key);
    }

    println!("count:");
    for key in units
        .iter()
        .filter(|key| !is_weight_unit(key) && !is_volume_unit(key))
    {
        print_unit(key);
    }

    Ok(())
}

fn print_unit(key: &str) {
    if let Some(def) = find_unit(key) {
        println!("  {:<8} {} base units", def.key, def.base_factor);
    }
}
