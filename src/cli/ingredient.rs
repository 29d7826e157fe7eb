use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use stockpot_inventory::{
    list_ingredients, read_csv, write_csv, Command, IngredientCategory, IngredientFilter,
    IngredientInput, IngredientRow, SortBy,
};
use stockpot_units::CostConverter;

use crate::config::Config;

#[derive(Args)]
pub struct IngredientArgs {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "other")]
    category: IngredientCategory,

    /// Unit the ingredient is bought in (e.g. kg, l, box)
    #[arg(long)]
    purchase_unit: String,

    /// How many purchase units one pack holds
    #[arg(long)]
    pack_size: f64,

    #[arg(long)]
    pack_price: f64,

    /// Unit recipes cost this ingredient in (e.g. g, ml, pc)
    #[arg(long)]
    cost_unit: String,

    #[arg(long, default_value_t = 0.0)]
    wastage_pct: f64,

    #[arg(long, default_value_t = 0.0)]
    stock_qty: f64,

    #[arg(long, default_value_t = 0.0)]
    reorder_level: f64,
}

impl From<IngredientArgs> for IngredientInput {
    fn from(args: IngredientArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            purchase_unit: args.purchase_unit,
            pack_size: args.pack_size,
            pack_price: args.pack_price,
            cost_unit: args.cost_unit,
            wastage_pct: args.wastage_pct,
            stock_qty: args.stock_qty,
            reorder_level: args.reorder_level,
        }
    }
}

#[derive(Subcommand)]
pub enum IngredientCommands {
    /// Add an ingredient
    Add {
        #[command(flatten)]
        args: IngredientArgs,
    },
    /// List ingredients
    List {
        /// Filter by a name substring
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<IngredientCategory>,

        /// Only ingredients at or below their reorder level
        #[arg(long)]
        low_stock: bool,

        #[arg(long, default_value = "name")]
        sort: SortBy,

        /// Display costs per this unit instead of the stored cost unit
        #[arg(long)]
        cost_unit: Option<String>,
    },
    /// Show one ingredient
    Show { id: String },
    /// Replace an ingredient's fields
    Update {
        id: String,

        #[command(flatten)]
        args: IngredientArgs,
    },
    /// Delete an ingredient
    Delete { id: String },
    /// Add a signed delta, in the costing unit, to the stock level
    AdjustStock {
        id: String,

        #[arg(allow_negative_numbers = true)]
        delta: f64,
    },
    /// Import ingredients from a CSV file
    Import {
        file: PathBuf,

        /// Parse and report without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Export all ingredients to a CSV file
    Export { file: PathBuf },
}

pub async fn run(config: Config, command: IngredientCommands) -> Result<()> {
    let write_db = crate::db::create_write_pool(&config.database.url).await?;
    let read_db =
        crate::db::create_read_pool(&config.database.url, config.database.max_connections).await?;
    let commands = Command::new(write_db, read_db.clone());

    match command {
        IngredientCommands::Add { args } => {
            let id = commands.create(args.into()).await?;
            println!("{id}");
        }
        IngredientCommands::List {
            search,
            category,
            low_stock,
            sort,
            cost_unit,
        } => {
            let filter = IngredientFilter {
                search,
                category,
                low_stock_only: low_stock,
                sort_by: sort,
            };
            let rows = list_ingredients(&read_db, filter).await?;
            let mut converter = CostConverter::new();

            for row in &rows {
                let (cost, unit) = match &cost_unit {
                    Some(unit) => (row.cost_in(unit, &mut converter), unit.as_str()),
                    None => (row.cost_per_unit, row.cost_unit.as_str()),
                };
                let low = if row.is_low_stock() { "  LOW" } else { "" };
                println!(
                    "{}  {:<30} {:<10} {:.4}/{}  stock {} {}{}",
                    row.id,
                    row.name,
                    row.category(),
                    cost,
                    unit,
                    row.stock_qty,
                    row.cost_unit,
                    low,
                );
            }
        }
        IngredientCommands::Show { id } => {
            let Some(row) = stockpot_inventory::find_ingredient(&read_db, id).await? else {
                anyhow::bail!("ingredient not found");
            };
            print_ingredient(&row);
        }
        IngredientCommands::Update { id, args } => {
            commands.update(id, args.into()).await?;
        }
        IngredientCommands::Delete { id } => {
            commands.delete(id).await?;
        }
        IngredientCommands::AdjustStock { id, delta } => {
            let stock_qty = commands.adjust_stock(id, delta).await?;
            println!("{stock_qty}");
        }
        IngredientCommands::Import { file, dry_run } => {
            let report = read_csv(File::open(&file)?);
            for error in &report.errors {
                println!("line {}: {}", error.line, error.message);
            }

            if dry_run {
                println!(
                    "{} rows parsed, {} rows failed",
                    report.inputs.len(),
                    report.errors.len()
                );
                return Ok(());
            }

            let mut created = 0usize;
            let mut rejected = 0usize;
            for input in report.inputs {
                let name = input.name.clone();
                match commands.create(input).await {
                    Ok(_) => created += 1,
                    Err(err) => {
                        rejected += 1;
                        println!("{name}: {err}");
                    }
                }
            }
            println!(
                "imported {created} ingredients ({} parse errors, {rejected} rejected)",
                report.errors.len()
            );
        }
        IngredientCommands::Export { file } => {
            let rows = list_ingredients(&read_db, IngredientFilter::default()).await?;
            let count = write_csv(File::create(&file)?, &rows)?;
            println!("exported {count} ingredients to {}", file.display());
        }
    }

    Ok(())
}

fn print_ingredient(row: &IngredientRow) {
    println!("id:             {}", row.id);
    println!("name:           {}", row.name);
    println!("category:       {}", row.category());
    println!(
        "pack:           {} {} at {}",
        row.pack_size, row.purchase_unit, row.pack_price
    );
    println!("cost:           {:.4}/{}", row.cost_per_unit, row.cost_unit);
    println!(
        "effective cost: {:.4}/{} ({}% wastage)",
        row.effective_cost_per_unit(),
        row.cost_unit,
        row.wastage_pct
    );
    println!(
        "stock:          {} {} (reorder at {})",
        row.stock_qty, row.cost_unit, row.reorder_level
    );
}
