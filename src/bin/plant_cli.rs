use std::{fs, path::PathBuf, str::FromStr, sync::Arc};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{ArgAction, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use plant_maintenance::{
    commands::{
        production::{CreateProductionRecordCommand, DeleteProductionRecordCommand},
        spareparts::{AddSparePartCommand, DeleteSparePartCommand},
        units::{CreateUnitCommand, DeleteUnitCommand},
        workorders::{
            AddManpowerCommand, AddMaterialCommand, CloseWorkOrderCommand,
            CreateWorkOrderCommand, DeleteWorkOrderCommand, RemoveManpowerCommand,
            RemoveMaterialCommand, UpdateWorkOrderCommand, WorkOrderPatch,
        },
    },
    common::{format_currency, parse_clock, parse_date, CLOCK_FORMAT},
    config::{self, AppConfig},
    errors::ServiceError,
    models::{
        ActivityType, MaterialStatus, NewMaterialUsage, ProductionRecord, Shift, SparePart, Unit,
        WorkOrder, WorkOrderDraft, WorkStatus,
    },
    services::{
        export::{WorkOrderExporter, EXPORT_FILE_NAME},
        suggestions::SuggestionField,
        units::UnitRosterClient,
    },
    storage::{JsonFileStore, StateStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut context = CliContext::initialize().await?;

    let outcome = match cli.command {
        Commands::Wo(command) => handle_wo_command(&mut context, command, cli.json),
        Commands::Production(command) => {
            handle_production_command(&mut context, command, cli.json)
        }
        Commands::Units(command) => handle_units_command(&mut context, command, cli.json),
        Commands::Parts(command) => handle_parts_command(&mut context, command, cli.json),
        Commands::Report => handle_report(&context, cli.json),
        Commands::Suggest(args) => handle_suggest(&context, args, cli.json),
    };

    if let Err(err) = outcome {
        if let Some(service_err) = err.downcast_ref::<ServiceError>() {
            if service_err.is_user_error() {
                eprintln!("error: {}", service_err);
                std::process::exit(2);
            }
        }
        return Err(err);
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    name = "plant",
    about = "Plant maintenance CLI for breakdown work orders, rosters and reports",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Breakdown work orders
    #[command(subcommand)]
    Wo(WoCommands),
    /// Production log
    #[command(subcommand)]
    Production(ProductionCommands),
    /// Unit roster
    #[command(subcommand)]
    Units(UnitCommands),
    /// Spare-part catalog
    #[command(subcommand)]
    Parts(PartCommands),
    /// Maintenance and production totals
    Report,
    /// Autocomplete history for a free-text field
    Suggest(SuggestArgs),
}

#[derive(Subcommand)]
enum WoCommands {
    List(WoListArgs),
    Show(WoRefArgs),
    Create(WoCreateArgs),
    #[command(subcommand)]
    Manpower(ManpowerCommands),
    #[command(subcommand)]
    Material(MaterialCommands),
    Close(WoCloseArgs),
    Edit(WoEditArgs),
    Delete(WoDeleteArgs),
    Export(WoExportArgs),
}

#[derive(Args)]
struct WoListArgs {
    #[arg(long, action = ArgAction::SetTrue, help = "Only OPEN work orders")]
    open: bool,
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "open", help = "Only RFU work orders")]
    closed: bool,
}

#[derive(Args)]
struct WoRefArgs {
    #[arg(help = "Work order number, e.g. WO-00001")]
    wo_number: String,
}

#[derive(Args)]
struct WoCreateArgs {
    #[arg(long, value_parser = parse_date_arg, help = "Breakdown date (YYYY-MM-DD), defaults to today")]
    date: Option<NaiveDate>,
    #[arg(long, help = "Unit code")]
    unit: String,
    #[arg(long, help = "Unit type; looked up from the roster when omitted")]
    unit_type: Option<String>,
    #[arg(long, value_parser = parse_clock_arg, help = "Breakdown start time (HH:MM)")]
    start: NaiveTime,
    #[arg(long)]
    component: String,
    #[arg(long)]
    sub_component: String,
    #[arg(long, help = "Breakdown information")]
    description: String,
    #[arg(long, default_value = "InProgress", help = "InProgress or Pending")]
    work_status: WorkStatus,
}

#[derive(Subcommand)]
enum ManpowerCommands {
    Add {
        wo_number: String,
        name: String,
    },
    Remove {
        wo_number: String,
        #[arg(help = "Zero-based position in the manpower list")]
        index: usize,
    },
}

#[derive(Subcommand)]
enum MaterialCommands {
    Add(MaterialAddArgs),
    Remove {
        wo_number: String,
        #[arg(help = "Zero-based position in the material list")]
        index: usize,
    },
}

#[derive(Args)]
struct MaterialAddArgs {
    wo_number: String,
    #[arg(long, help = "Fill name, part number, price and unit from the spare-part catalog")]
    catalog: Option<String>,
    #[arg(long, required_unless_present = "catalog")]
    material: Option<String>,
    #[arg(long)]
    part_no: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    qty: i64,
    #[arg(long, help = "Unit of measure, e.g. pcs")]
    uom: Option<String>,
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    price: Option<Decimal>,
    #[arg(long, default_value = "Installed", help = "Installed, PendingRequest or NotNeeded")]
    status: MaterialStatus,
}

/// Staged sub-ledger changes applied on top of the work order's current lists.
#[derive(Args)]
struct DraftArgs {
    #[arg(long = "manpower", action = ArgAction::Append, help = "Add a crew member (repeatable)")]
    add_manpower: Vec<String>,
    #[arg(long = "remove-manpower", action = ArgAction::Append, help = "Drop a crew member by position (repeatable)")]
    remove_manpower: Vec<usize>,
    #[arg(
        long = "material",
        action = ArgAction::Append,
        value_parser = parse_material_line,
        help = "Add a material line: material=..,qty=..,uom=..,price=..[,part=..][,status=..]"
    )]
    add_material: Vec<NewMaterialUsage>,
    #[arg(long = "remove-material", action = ArgAction::Append, help = "Drop a material line by position (repeatable)")]
    remove_material: Vec<usize>,
}

impl DraftArgs {
    fn is_empty(&self) -> bool {
        self.add_manpower.is_empty()
            && self.remove_manpower.is_empty()
            && self.add_material.is_empty()
            && self.remove_material.is_empty()
    }

    /// Removals run first, highest position first, so positions refer to the
    /// lists as they were before this command.
    fn stage(&self, work_order: &WorkOrder) -> Result<WorkOrderDraft, ServiceError> {
        let mut draft = WorkOrderDraft::from_work_order(work_order);

        let mut manpower_positions = self.remove_manpower.clone();
        manpower_positions.sort_unstable_by(|a, b| b.cmp(a));
        manpower_positions.dedup();
        for index in manpower_positions {
            draft.remove_manpower(index)?;
        }

        let mut material_positions = self.remove_material.clone();
        material_positions.sort_unstable_by(|a, b| b.cmp(a));
        material_positions.dedup();
        for index in material_positions {
            draft.remove_material(index)?;
        }

        for name in &self.add_manpower {
            draft.add_manpower(name)?;
        }
        for line in &self.add_material {
            draft.add_material(line.clone())?;
        }
        Ok(draft)
    }
}

#[derive(Args)]
struct WoCloseArgs {
    wo_number: String,
    #[arg(long = "end", value_parser = parse_clock_arg, help = "Time the unit was back in service (HH:MM)")]
    end_time: Option<NaiveTime>,
    #[arg(long = "work-description", default_value = "", help = "What was done")]
    work_description: String,
    #[command(flatten)]
    draft: DraftArgs,
}

#[derive(Args)]
struct WoEditArgs {
    wo_number: String,
    #[arg(long, help = "Edit username")]
    username: String,
    #[arg(long, help = "Edit password")]
    password: String,
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,
    #[arg(long)]
    unit: Option<String>,
    #[arg(long)]
    unit_type: Option<String>,
    #[arg(long)]
    component: Option<String>,
    #[arg(long)]
    sub_component: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    work_status: Option<WorkStatus>,
    #[arg(long = "start", value_parser = parse_clock_arg)]
    start_time: Option<NaiveTime>,
    #[arg(long = "end", value_parser = parse_clock_arg, conflicts_with = "clear_end")]
    end_time: Option<NaiveTime>,
    #[arg(long, action = ArgAction::SetTrue)]
    clear_end: bool,
    #[arg(long, conflicts_with = "clear_work_description")]
    work_description: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    clear_work_description: bool,
    #[command(flatten)]
    draft: DraftArgs,
}

impl WoEditArgs {
    fn patch(&self, work_order: &WorkOrder) -> Result<WorkOrderPatch, ServiceError> {
        Ok(WorkOrderPatch {
            date: self.date,
            unit: self.unit.clone(),
            unit_type: self.unit_type.clone(),
            component: self.component.clone(),
            sub_component: self.sub_component.clone(),
            description: self.description.clone(),
            work_status: self.work_status,
            start_time: self.start_time,
            end_time: clearable(self.end_time, self.clear_end),
            work_description: clearable(
                self.work_description.clone(),
                self.clear_work_description,
            ),
            draft: if self.draft.is_empty() {
                None
            } else {
                Some(self.draft.stage(work_order)?)
            },
        })
    }
}

fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

#[derive(Args)]
struct WoDeleteArgs {
    wo_number: String,
    #[arg(long, action = ArgAction::SetTrue, help = "Confirm the deletion")]
    yes: bool,
}

#[derive(Args)]
struct WoExportArgs {
    #[arg(long, short, help = "Destination file, defaults to Work_Orders_Export.csv")]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ProductionCommands {
    List,
    Add(ProductionAddArgs),
    Delete {
        #[arg(value_parser = clap::value_parser!(Uuid), help = "Record identifier")]
        id: Uuid,
    },
}

#[derive(Args)]
struct ProductionAddArgs {
    #[arg(long, value_parser = parse_date_arg, help = "Production date (YYYY-MM-DD), defaults to today")]
    date: Option<NaiveDate>,
    #[arg(long)]
    unit: String,
    #[arg(long, default_value = "Morning", help = "Morning, Afternoon or Night")]
    shift: Shift,
    #[arg(long, help = "Hauling, OB, BB, Loading or Stockpile")]
    activity: ActivityType,
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    quantity: Decimal,
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true, help = "Operational hours")]
    hours: Decimal,
    #[arg(long)]
    operator: Option<String>,
}

#[derive(Subcommand)]
enum UnitCommands {
    List,
    Add(UnitAddArgs),
    Delete { code: String },
}

#[derive(Args)]
struct UnitAddArgs {
    #[arg(long)]
    code: String,
    #[arg(long = "type")]
    unit_type: String,
    #[arg(long, help = "Display name, defaults to the code")]
    name: Option<String>,
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true, default_value = "0", help = "Cost per operational hour")]
    rate: Decimal,
}

#[derive(Subcommand)]
enum PartCommands {
    List,
    Add(PartAddArgs),
    Delete { part_no: String },
}

#[derive(Args)]
struct PartAddArgs {
    #[arg(long)]
    part_no: String,
    #[arg(long)]
    name: String,
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    price: Decimal,
    #[arg(long, help = "Unit of measure, defaults to pcs")]
    uom: Option<String>,
}

#[derive(Args)]
struct SuggestArgs {
    #[arg(help = "component, subComponent, manpower or material")]
    field: SuggestionField,
}

struct CliContext {
    config: AppConfig,
    state: AppState,
}

impl CliContext {
    async fn initialize() -> Result<Self> {
        let config = config::load_config().context("failed to load application config")?;
        config::init_tracing(&config.log_level, config.log_json);

        let store: Arc<dyn StateStore> = Arc::new(JsonFileStore::new(&config.data_dir));
        let mut state = AppState::load(store);

        let roster = UnitRosterClient::new(
            config.unit_roster_url.clone(),
            config.unit_roster_timeout(),
        )
        .context("failed to build unit roster client")?;
        state.ensure_unit_roster(&roster).await;

        Ok(Self { config, state })
    }

    fn work_order(&self, wo_number: &str) -> Result<&WorkOrder, ServiceError> {
        self.state
            .plant()
            .work_order(wo_number)
            .ok_or_else(|| ServiceError::not_found(format!("Work Order {} not found", wo_number)))
    }
}

fn handle_wo_command(context: &mut CliContext, command: WoCommands, json: bool) -> Result<()> {
    match command {
        WoCommands::List(args) => {
            let plant = context.state.plant();
            let listed: Vec<&WorkOrder> = if args.open {
                plant.open_work_orders().collect()
            } else if args.closed {
                plant.closed_work_orders().collect()
            } else {
                plant.work_orders.iter().collect()
            };
            if json {
                print_json(&listed)?;
            } else if listed.is_empty() {
                println!("No work orders");
            } else {
                listed.into_iter().for_each(render_work_order_line);
            }
        }
        WoCommands::Show(args) => {
            let work_order = context.work_order(&args.wo_number)?;
            if json {
                print_json(work_order)?;
            } else {
                render_work_order(work_order);
            }
        }
        WoCommands::Create(args) => {
            let created = context.state.dispatch(CreateWorkOrderCommand {
                date: args.date.unwrap_or_else(|| Local::now().date_naive()),
                unit: args.unit,
                unit_type: args.unit_type,
                start_time: args.start,
                component: args.component,
                sub_component: args.sub_component,
                description: args.description,
                work_status: args.work_status,
            })?;
            emit(&created, json, |wo| {
                println!("Work Order {} created (OPEN)", wo.wo_number)
            })?;
        }
        WoCommands::Manpower(ManpowerCommands::Add { wo_number, name }) => {
            let added = context
                .state
                .dispatch(AddManpowerCommand { wo_number: wo_number.clone(), name })?;
            emit(&added, json, |name| {
                println!("{} added to {}", name, wo_number)
            })?;
        }
        WoCommands::Manpower(ManpowerCommands::Remove { wo_number, index }) => {
            let removed = context.state.dispatch(RemoveManpowerCommand {
                wo_number: wo_number.clone(),
                index,
            })?;
            emit(&removed, json, |name| {
                println!("{} removed from {}", name, wo_number)
            })?;
        }
        WoCommands::Material(MaterialCommands::Add(args)) => {
            let line = material_line(context, &args)?;
            let added = context.state.dispatch(AddMaterialCommand {
                wo_number: args.wo_number.clone(),
                line,
            })?;
            emit(&added, json, |m| {
                println!(
                    "{} x{} {} added to {} ({})",
                    m.material,
                    m.quantity,
                    m.unit_of_measure,
                    args.wo_number,
                    format_currency(m.total_price)
                )
            })?;
        }
        WoCommands::Material(MaterialCommands::Remove { wo_number, index }) => {
            let removed = context.state.dispatch(RemoveMaterialCommand {
                wo_number: wo_number.clone(),
                index,
            })?;
            emit(&removed, json, |m| {
                println!("{} removed from {}", m.material, wo_number)
            })?;
        }
        WoCommands::Close(args) => {
            let draft = args.draft.stage(context.work_order(&args.wo_number)?)?;
            let closed = context.state.dispatch(CloseWorkOrderCommand {
                wo_number: args.wo_number,
                end_time: args.end_time,
                work_description: args.work_description,
                draft,
            })?;
            emit(&closed, json, |wo| {
                println!(
                    "Work Order {} is RFU after {} min",
                    wo.wo_number,
                    wo.duration_minutes
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "-".into())
                )
            })?;
        }
        WoCommands::Edit(args) => {
            let grant = context
                .config
                .edit_authorizer()
                .authorize(&args.username, &args.password)?;
            let patch = args.patch(context.work_order(&args.wo_number)?)?;
            let updated = context.state.dispatch(UpdateWorkOrderCommand {
                grant,
                wo_number: args.wo_number,
                patch,
            })?;
            emit(&updated, json, |wo| {
                println!("Work Order {} updated ({})", wo.wo_number, wo.status)
            })?;
        }
        WoCommands::Delete(args) => {
            if !args.yes {
                return Err(ServiceError::validation(format!(
                    "refusing to delete {} without --yes",
                    args.wo_number
                ))
                .into());
            }
            let removed = context.state.dispatch(DeleteWorkOrderCommand {
                wo_number: args.wo_number,
            })?;
            emit(&removed, json, |wo| {
                println!("Work Order {} deleted", wo.wo_number)
            })?;
        }
        WoCommands::Export(args) => {
            let document = WorkOrderExporter::to_csv(&context.state.plant().work_orders)?;
            let output = args
                .output
                .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
            fs::write(&output, document)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "Exported {} work orders to {}",
                context.state.plant().work_orders.len(),
                output.display()
            );
        }
    }
    Ok(())
}

fn material_line(context: &CliContext, args: &MaterialAddArgs) -> Result<NewMaterialUsage> {
    let mut line = match &args.catalog {
        Some(part_no) => context
            .state
            .plant()
            .spare_part(part_no.trim())
            .ok_or_else(|| ServiceError::not_found(format!("Spare part {} not found", part_no)))?
            .to_material_line(args.qty, args.status),
        None => NewMaterialUsage {
            material: args.material.clone().unwrap_or_default(),
            part_no: None,
            quantity: args.qty,
            unit_of_measure: String::new(),
            unit_price: Decimal::ZERO,
            material_status: args.status,
        },
    };

    // Explicit flags win over catalog values
    if let Some(material) = &args.material {
        line.material = material.clone();
    }
    if let Some(part_no) = &args.part_no {
        line.part_no = Some(part_no.clone());
    }
    if let Some(uom) = &args.uom {
        line.unit_of_measure = uom.clone();
    }
    if let Some(price) = args.price {
        line.unit_price = price;
    } else if args.catalog.is_none() {
        return Err(ServiceError::validation("--price is required without --catalog").into());
    }
    Ok(line)
}

fn handle_production_command(
    context: &mut CliContext,
    command: ProductionCommands,
    json: bool,
) -> Result<()> {
    match command {
        ProductionCommands::List => {
            let records = &context.state.plant().production_records;
            if json {
                print_json(records)?;
            } else if records.is_empty() {
                println!("No production records");
            } else {
                records.iter().for_each(render_production_record);
            }
        }
        ProductionCommands::Add(args) => {
            let record = context.state.dispatch(CreateProductionRecordCommand {
                date: args.date.unwrap_or_else(|| Local::now().date_naive()),
                unit: args.unit,
                shift: args.shift,
                activity_type: args.activity,
                quantity: args.quantity,
                duration_hours: args.hours,
                operator: args.operator,
            })?;
            emit(&record, json, render_production_record)?;
        }
        ProductionCommands::Delete { id } => {
            let removed = context
                .state
                .dispatch(DeleteProductionRecordCommand { id })?;
            emit(&removed, json, |r| println!("Production record {} deleted", r.id))?;
        }
    }
    Ok(())
}

fn handle_units_command(context: &mut CliContext, command: UnitCommands, json: bool) -> Result<()> {
    match command {
        UnitCommands::List => {
            let units = &context.state.plant().units;
            if json {
                print_json(units)?;
            } else {
                units.iter().for_each(render_unit);
            }
        }
        UnitCommands::Add(args) => {
            let unit = context.state.dispatch(CreateUnitCommand {
                code: args.code,
                display_name: args.name,
                unit_type: args.unit_type,
                cost_per_operational_hour: args.rate,
            })?;
            emit(&unit, json, render_unit)?;
        }
        UnitCommands::Delete { code } => {
            let removed = context.state.dispatch(DeleteUnitCommand { code })?;
            emit(&removed, json, |u| println!("Unit {} removed", u.code))?;
        }
    }
    Ok(())
}

fn handle_parts_command(context: &mut CliContext, command: PartCommands, json: bool) -> Result<()> {
    match command {
        PartCommands::List => {
            let parts = &context.state.plant().spare_parts;
            if json {
                print_json(parts)?;
            } else if parts.is_empty() {
                println!("Catalog is empty");
            } else {
                parts.iter().for_each(render_spare_part);
            }
        }
        PartCommands::Add(args) => {
            let part = context.state.dispatch(AddSparePartCommand {
                part_no: args.part_no,
                name: args.name,
                unit_price: args.price,
                unit_of_measure: args.uom,
            })?;
            emit(&part, json, render_spare_part)?;
        }
        PartCommands::Delete { part_no } => {
            let removed = context
                .state
                .dispatch(DeleteSparePartCommand { part_no })?;
            emit(&removed, json, |p| println!("Spare part {} removed", p.part_no))?;
        }
    }
    Ok(())
}

fn handle_report(context: &CliContext, json: bool) -> Result<()> {
    let summary = context.state.plant().report();
    if json {
        return print_json(&summary);
    }

    println!(
        "Maintenance cost (RFU): {}",
        format_currency(summary.total_maintenance_cost)
    );
    println!(
        "Work orders: {} open, {} RFU",
        summary.open_work_orders, summary.closed_work_orders
    );
    println!("Production by activity:");
    for (activity, quantity) in &summary.production_by_activity {
        println!("  {:<15} {}", activity.to_string(), quantity);
    }
    println!(
        "Production cost: {}",
        format_currency(summary.total_production_cost)
    );
    Ok(())
}

fn handle_suggest(context: &CliContext, args: SuggestArgs, json: bool) -> Result<()> {
    let values = context.state.plant().suggestions.values(args.field);
    if json {
        return print_json(&values);
    }
    values.iter().for_each(|value| println!("{}", value));
    Ok(())
}

/// Prints `value` as JSON or through the text renderer.
fn emit<T: Serialize>(value: &T, json: bool, render: impl FnOnce(&T)) -> Result<()> {
    if json {
        print_json(value)
    } else {
        render(value);
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn clock(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format(CLOCK_FORMAT).to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn render_work_order_line(wo: &WorkOrder) {
    println!(
        "- {} • {} • {} {} • {}/{} • {} • {}",
        wo.wo_number,
        wo.date,
        wo.unit,
        wo.unit_type,
        wo.component,
        wo.sub_component,
        wo.work_status,
        wo.status
    );
}

fn render_work_order(wo: &WorkOrder) {
    println!("{} ({})", wo.wo_number, wo.status);
    println!("  Date:        {}", wo.date);
    println!("  Unit:        {} {}", wo.unit, wo.unit_type);
    println!("  Component:   {} / {}", wo.component, wo.sub_component);
    println!("  Breakdown:   {}", wo.description);
    println!("  Work status: {}", wo.work_status);
    println!(
        "  Time:        {} → {} ({} min)",
        clock(wo.start_time),
        clock(wo.end_time),
        wo.duration_minutes
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".into())
    );
    if let Some(done) = &wo.work_description {
        println!("  Work done:   {}", done);
    }
    println!("  Manpower:");
    for (i, name) in wo.manpower.iter().enumerate() {
        println!("    [{}] {}", i, name);
    }
    println!("  Materials:");
    for (i, m) in wo.materials.iter().enumerate() {
        println!(
            "    [{}] {} {} x{} {} @ {} = {} ({})",
            i,
            m.material,
            m.part_no.as_deref().unwrap_or("-"),
            m.quantity,
            m.unit_of_measure,
            format_currency(m.unit_price),
            format_currency(m.total_price),
            m.material_status
        );
    }
    println!("  Material cost: {}", format_currency(wo.material_cost()));
}

fn render_production_record(record: &ProductionRecord) {
    println!(
        "- {} • {} • {} {} • {} • {} {} in {} h • {}",
        record.id,
        record.date,
        record.unit,
        record.unit_type,
        record.shift,
        record.activity_type,
        record.quantity,
        record.duration_hours,
        format_currency(record.estimated_cost)
    );
}

fn render_unit(unit: &Unit) {
    println!(
        "- {} ({}) • {} • {}/h",
        unit.code,
        unit.display_name,
        unit.unit_type,
        format_currency(unit.cost_per_operational_hour)
    );
}

fn render_spare_part(part: &SparePart) {
    println!(
        "- {} • {} • {} / {}",
        part.part_no,
        part.name,
        format_currency(part.unit_price),
        part.unit_of_measure
    );
}

fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw.trim()).map_err(|_| format!("invalid decimal '{raw}'"))
}

fn parse_clock_arg(raw: &str) -> Result<NaiveTime, String> {
    parse_clock(raw).map_err(|e| e.to_string())
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| e.to_string())
}

fn parse_material_line(raw: &str) -> Result<NewMaterialUsage, String> {
    let mut line = NewMaterialUsage {
        material: String::new(),
        part_no: None,
        quantity: 0,
        unit_of_measure: String::new(),
        unit_price: Decimal::ZERO,
        material_status: MaterialStatus::default(),
    };

    for part in raw.split(',') {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| format!("invalid segment '{part}', expected key=value"))?;
        let key = key.trim();
        let value = value.trim();

        match key {
            "material" => line.material = value.to_string(),
            "part" => line.part_no = Some(value.to_string()),
            "qty" => {
                line.quantity = value
                    .parse()
                    .map_err(|_| format!("invalid qty '{value}'"))?
            }
            "uom" => line.unit_of_measure = value.to_string(),
            "price" => line.unit_price = parse_decimal(value)?,
            "status" => {
                line.material_status = MaterialStatus::from_str(value)
                    .map_err(|_| format!("invalid status '{value}'"))?
            }
            other => return Err(format!("unknown material field '{other}'")),
        }
    }
    Ok(line)
}
