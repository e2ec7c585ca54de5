mod app;
mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, Screen};
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands, CropCommand};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use db::Database;
use error::{CropSenseError, Result};
use logic::RefreshService;
use models::{Crop, CropHealth, CropStatus, Report};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{CropsScreen, DashboardScreen};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    let config = match resolve_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if matches!(cli.command, Some(Commands::Init)) {
        return Ok(());
    }

    let db = Database::open(&Config::db_path(cli.data_dir.as_ref())?)?;

    match cli.command {
        None => run_dashboard(config, db).await,
        Some(Commands::Init) => Ok(()),
        Some(Commands::Check) => run_check(&config, db).await,
        Some(Commands::Report { json }) => run_report(&config, db, json).await,
        Some(Commands::Crop(cmd)) => run_crop_command(&config, &db, cmd),
        Some(Commands::Rules) => {
            let service = RefreshService::new(&config, db);
            for (id, name, description) in service.engine().list_rules() {
                println!("{:<20} {:<28} {}", id, name, description);
            }
            Ok(())
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    if matches!(cli.command, Some(Commands::Init)) {
        return Config::setup_interactive().map(|(config, _)| config);
    }

    if !Config::exists(cli.config.as_ref()) && cli.command.is_none() {
        return Config::setup_interactive().map(|(config, _)| config);
    }

    Config::load(cli.config.as_ref())
}

async fn run_check(config: &Config, db: Database) -> Result<()> {
    println!("Config OK: farm '{}' (owner {})", config.farm.name, config.farm.owner);
    println!("Database: {}", db.path().display());

    let status = RefreshService::new(config, db).check_connections().await;
    println!(
        "Crop store:     {}",
        if status.database { "OK" } else { "FAILED" }
    );
    match status.openweathermap {
        Some(true) => println!("OpenWeatherMap: OK"),
        Some(false) => println!("OpenWeatherMap: OFFLINE"),
        None => println!("OpenWeatherMap: not configured"),
    }

    if !status.database {
        return Err(CropSenseError::DataSourceUnavailable(
            "crop store query failed".into(),
        ));
    }
    Ok(())
}

async fn run_report(config: &Config, db: Database, json: bool) -> Result<()> {
    let service = RefreshService::new(config, db);
    let outcome = service.refresh(Local::now().date_naive()).await;
    outcome.require_crops()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        print_report(&config.farm.name, &outcome.report);
    }
    Ok(())
}

fn print_report(farm_name: &str, report: &Report) {
    println!("{}", farm_name);
    println!();

    if let Some(alert) = &report.alert {
        println!("[{}] {}", alert.kind, alert.message);
        println!();
    }

    if !report.distribution.is_empty() {
        println!(
            "Crops: {} growing, {} harvested",
            report.distribution.growing, report.distribution.harvested
        );
        println!();
    }

    for insight in &report.insights {
        println!("{} {} [{}]", insight.category.symbol(), insight.title, insight.category);
        println!("    {}", insight.body);
    }
}

fn run_crop_command(config: &Config, db: &Database, cmd: CropCommand) -> Result<()> {
    match cmd {
        CropCommand::Add {
            name,
            planted,
            health,
        } => {
            let health = CropHealth::from_str(&health).ok_or_else(|| {
                CropSenseError::InvalidData(format!("unknown health '{}'", health))
            })?;
            let crop = Crop::new(name, planted, CropStatus::Growing)
                .with_owner(&config.farm.owner)
                .with_health(health);
            let id = db.create_crop(&crop)?;
            println!("Added crop {} ({})", id, crop.name);
        }
        CropCommand::List => {
            let today = Local::now().date_naive();
            for crop in db.get_crops_for_owner(&config.farm.owner)? {
                println!(
                    "{:>4}  {:<24} {:>5}d  {:<10} {}",
                    crop.id.unwrap_or_default(),
                    crop.name,
                    crop.age_days(today),
                    crop.status,
                    crop.health
                );
            }
        }
        CropCommand::Harvest { id } => {
            db.update_crop_status(id, CropStatus::Harvested)?;
            println!("Crop {} marked harvested", id);
        }
        CropCommand::Remove { id } => {
            db.delete_crop(id)?;
            println!("Crop {} removed", id);
        }
    }
    Ok(())
}

async fn run_dashboard(config: Config, db: Database) -> Result<()> {
    let service = RefreshService::new(&config, db.clone());
    let mut app = App::new(config, db);

    let outcome = service.refresh(Local::now().date_naive()).await;
    app.apply_refresh(outcome);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    service: &RefreshService,
) -> Result<()> {
    loop {
        let today = Local::now().date_naive();
        let refreshed = app.last_refreshed_label();

        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let screen =
                        DashboardScreen::new(&app.config.farm.name, &app.report, app.weather.as_ref())
                            .refreshed_at(refreshed.as_deref())
                            .with_status(app.status_message.as_deref())
                            .with_selection(app.insights_state.selected_index);
                    f.render_widget(screen, area);
                }
                Screen::Crops => {
                    let screen = CropsScreen::new(&app.crops, today)
                        .with_selection(app.crops_state.selected_index);
                    f.render_widget(screen, area);
                }
            }
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => app.quit(),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.quit();
                        }
                        KeyCode::Esc => app.switch_screen(Screen::Dashboard),
                        KeyCode::Char('r') => app.request_refresh(),
                        KeyCode::Char(c) if Screen::from_key(c).is_some() => {
                            if let Some(screen) = Screen::from_key(c) {
                                app.switch_screen(screen);
                            }
                        }
                        code => handle_screen_input(app, code),
                    }
                }
            }
        }

        // Every refresh rebuilds the whole report from fresh inputs
        if app.needs_refresh {
            app.needs_refresh = false;
            let outcome = service.refresh(Local::now().date_naive()).await;
            app.apply_refresh(outcome);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    if app.screen == Screen::Dashboard {
        match code {
            KeyCode::Up => app.insights_state.prev(),
            KeyCode::Down => app.insights_state.next(app.report.insights.len()),
            _ => {}
        }
        return;
    }

    let result = match code {
        KeyCode::Up => {
            app.crops_state.prev();
            Ok(())
        }
        KeyCode::Down => {
            app.crops_state.next(app.crops.len());
            Ok(())
        }
        KeyCode::Char('h') => app.toggle_selected_harvested(),
        KeyCode::Char('x') => app.remove_selected(),
        _ => Ok(()),
    };

    if let Err(e) = result {
        tracing::warn!("Crop update failed: {}", e);
        app.set_status(&format!("Update failed: {}", e));
    }
}
