// UI layer: a single terminal screen driven by the presenter state
// machine, with a `dialoguer` menu standing in for the window's button.
// The upload runs synchronously on this thread; an `indicatif` spinner
// shows while it is in flight.

use crate::api::{UpdateResponse, UploadClient};
use crate::error::UploadError;
use crate::logging::UpdateLog;
use crate::presenter::{Event, Presenter, Screen, UPLOAD_ACTION, WINDOW_TITLE};
use anyhow::Result;
use crossterm::style::Stylize;
use crossterm::execute;
use crossterm::terminal::SetTitle;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::stdout;
use std::time::Duration;

/// Run the updater window until the user exits.
pub fn run(api: UploadClient, mut update_log: UpdateLog) -> Result<()> {
    // Not every terminal supports a title; that is not worth failing over.
    if let Err(e) = execute!(stdout(), SetTitle(WINDOW_TITLE)) {
        log::debug!("could not set terminal title: {}", e);
    }

    let mut presenter = Presenter::new();
    loop {
        show(&presenter);

        let items = if presenter.can_upload() {
            vec![UPLOAD_ACTION, "Exit"]
        } else {
            vec!["Exit"]
        };
        let selection = Select::new().items(&items).default(0).interact()?;
        if items[selection] == "Exit" {
            break;
        }

        presenter.handle(Event::Triggered);
        show(&presenter);
        let result = upload_with_spinner(&api);
        complete(&mut presenter, &mut update_log, result);
    }
    Ok(())
}

/// Finish an upload: log each update before the result view is built. A
/// failed log write is reported on the result view, since the server has
/// already applied the file by then.
pub fn complete(
    presenter: &mut Presenter,
    update_log: &mut UpdateLog,
    result: Result<UpdateResponse, UploadError>,
) {
    let mut log_failure = None;
    match &result {
        Ok(resp) => {
            if let Err(e) = update_log.record_all(&resp.updates) {
                log::error!("update log write failed: {:#}", e);
                log_failure = Some(e);
            }
        }
        Err(e) => log::error!("upload failed: {}", e),
    }
    presenter.handle(Event::Completed(result));
    if let Some(e) = log_failure {
        presenter.warn(format!("Warning: updates were not written to the log ({:#})", e));
    }
}

fn upload_with_spinner(api: &UploadClient) -> Result<UpdateResponse, UploadError> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(api.input_path().display().to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = api.upload();
    spinner.finish_and_clear();
    result
}

fn show(presenter: &Presenter) {
    println!();
    let lines = presenter.render();
    let mut iter = lines.iter();
    if let Some(first) = iter.next() {
        match presenter.screen() {
            Screen::Failed { .. } => println!("{}", first.as_str().red().bold()),
            Screen::Ready => println!("{}", first.as_str().bold()),
            _ => println!("{}", first),
        }
    }
    for line in iter {
        println!("{}", line);
    }
}
