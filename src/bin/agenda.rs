//! Fills an in-memory backend with a few tasks, then shows what a task list derives from them.
//!
//! Pass the path of a JSON settings file as the first argument to override the default settings.
//! Set the RUST_LOG environment variable to display more info.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Duration as DateDuration, Utc};

use task_calendar::config::Settings;
use task_calendar::utils::comparison::compare_tasks_alpha;
use task_calendar::utils::{print_markers, print_task};
use task_calendar::{ClientContext, MemoryIdentity, MemoryStore};

const EMAIL: &str = "demo@example.com";
const PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        None => Settings::default(),
        Some(path) => match Settings::from_file(Path::new(&path)) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{}. Using default settings", err);
                Settings::default()
            },
        },
    };

    let identity = Arc::new(MemoryIdentity::new());
    identity.register(EMAIL, PASSWORD);
    if let Err(err) = identity.sign_in(EMAIL, PASSWORD) {
        log::error!("Unable to sign in: {}", err);
        return;
    }

    let context = ClientContext::init(Arc::new(MemoryStore::new()), identity, settings);
    if let Err(err) = run(&context).await {
        log::error!("{}", err);
    }
    context.teardown();
}

async fn run(context: &ClientContext<MemoryStore, MemoryIdentity>) -> Result<(), task_calendar::Error> {
    let mut screen = context.open_task_list().await?;
    let today = Utc::now();

    let samples = [
        ("Plan the week", 0, 0),
        ("Write the report", 0, 2),
        ("Prepare the trip", 2, 4),
    ];
    for (name, start, end) in samples.iter() {
        let session = screen.edit_session_mut();
        session.open_for_create();
        session.set_task_name(name.to_string());
        session.set_start_date(today + DateDuration::days(*start));
        session.set_end_date(today + DateDuration::days(*end));
        screen.commit_edit().await?;
        screen.refresh(Instant::now()).await;
    }

    if let Some(first) = screen.visible_tasks().first().map(|t| t.id().clone()) {
        screen.toggle_completion(&first, Instant::now())?.outcome().await?;
        screen.refresh(Instant::now()).await;
    }

    let mut all_tasks = screen.tasks().to_vec();
    all_tasks.sort_by(compare_tasks_alpha);
    println!("---- All tasks -----");
    let later = Instant::now() + Duration::from_secs(1);
    for task in &all_tasks {
        print_task(task, screen.transition_value(task.id(), later));
    }

    let selected = (today + DateDuration::days(2)).date_naive();
    screen.tap_day(selected, Instant::now());
    println!("---- Tasks of {} -----", selected);
    for task in screen.visible_tasks() {
        print_task(task, screen.transition_value(task.id(), later));
    }

    println!("---- Calendar -----");
    print_markers(screen.markers());
    match serde_json::to_string_pretty(screen.markers()) {
        Ok(json) => println!("{}", json),
        Err(err) => log::warn!("Unable to serialize markers: {}", err),
    }

    let stats = screen.stats();
    println!("{} tasks, {} completed, {} pending", stats.total, stats.completed, stats.pending);

    screen.unmount();
    Ok(())
}
