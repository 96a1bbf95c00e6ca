mod quotes;
mod timer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use ironlog::db::models::{Exercise, SetEntry, SetRow, Workout, format_best};
use ironlog::session::{ExerciseConfig, Session, SessionSummary};

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{
    DefaultTerminal,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::timer::{DEFAULT_REST, RestTimer};

#[derive(Parser, Debug)]
#[command(version, about = "Ironlog - Workout Log CLI", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pick a workout and run a training session interactively
    Interactive,
    /// List all workouts
    ListWorkouts {
        #[arg(short, long)]
        verbose: bool,
    },
    CreateWorkout {
        name: String,
    },
    RenameWorkout {
        id: i64,
        name: String,
    },
    DeleteWorkout {
        id: i64,
    },
    /// Add an exercise to a workout
    AddExercise {
        workout_id: i64,
        name: String,
        #[arg(short, long, default_value_t = 3)]
        sets: u32,
        #[arg(long)]
        no_warmup: bool,
    },
    RenameExercise {
        id: i64,
        name: String,
    },
    DeleteExercise {
        id: i64,
    },
    /// Save a note on an exercise
    AddNote {
        exercise_id: i64,
        note: String,
    },
    /// Show every logged session, newest first
    History {
        #[arg(long)]
        json: bool,
    },
}

fn db_path() -> String {
    env::var("IRONLOG_DB").unwrap_or_else(|_| "ironlog.db".to_string())
}

fn slot_title(slot: i64, config: &ExerciseConfig) -> String {
    if config.has_warmup {
        if slot == 0 {
            "Warm-up".to_string()
        } else {
            format!("Set {}", slot)
        }
    } else {
        format!("Set {}", slot + 1)
    }
}

// ---------------------------------------------------------------------------
// Workout selector screen
// ---------------------------------------------------------------------------

struct WorkoutSelector<'a> {
    session: &'a Session,
    workouts: Vec<Workout>,
    selected: usize,
    status_message: String,
    input_mode: InputMode,
    input_buffer: String,
}

enum InputMode {
    Normal,
    CreatingWorkout,
}

const SELECTOR_HELP: &str = "j/k: navigate | n: new workout | Enter: start | d: delete | q: quit";

impl<'a> WorkoutSelector<'a> {
    async fn new(session: &'a Session) -> Result<Self> {
        let workouts = session.list_workouts().await?;
        let status_message = if workouts.is_empty() {
            "No workouts found. Press 'n' to create a new workout, 'q' to quit".to_string()
        } else {
            SELECTOR_HELP.to_string()
        };

        Ok(Self {
            session,
            workouts,
            selected: 0,
            status_message,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
        })
    }

    fn scroll_down(&mut self) {
        if !self.workouts.is_empty() && self.selected < self.workouts.len() - 1 {
            self.selected += 1;
        }
    }

    fn scroll_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn enter_create_mode(&mut self) {
        self.input_mode = InputMode::CreatingWorkout;
        self.input_buffer.clear();
        self.status_message = "Enter workout name:".to_string();
    }

    async fn create_workout(&mut self) -> Result<()> {
        match self.session.create_workout(&self.input_buffer).await {
            Ok(workout) => {
                self.status_message = format!("Created workout: {}", workout.name);
                self.workouts.push(workout);
                self.selected = self.workouts.len() - 1;
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            Err(e) => {
                self.status_message = format!("Could not create workout: {}", e);
            }
        }
        Ok(())
    }

    async fn delete_selected(&mut self) -> Result<()> {
        if self.workouts.is_empty() {
            return Ok(());
        }

        let workout = self.workouts[self.selected].clone();
        self.session.delete_workout(workout.id).await?;
        self.workouts.remove(self.selected);

        if self.selected >= self.workouts.len() && !self.workouts.is_empty() {
            self.selected = self.workouts.len() - 1;
        }

        self.status_message = format!("Deleted workout: {}", workout.name);
        Ok(())
    }

    fn selected_workout(&self) -> Option<Workout> {
        self.workouts.get(self.selected).cloned()
    }
}

async fn run_workout_selector(
    mut terminal: DefaultTerminal,
    session: &Session,
) -> Result<Option<Workout>> {
    let mut selector = WorkoutSelector::new(session).await?;
    let quote = quotes::random_quote();

    loop {
        terminal.draw(|frame| {
            let chunks = Layout::vertical([
                Constraint::Length(4),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(frame.area());

            let header = Paragraph::new(format!("Ironlog - Workout Log\n{}", quote))
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(header, chunks[0]);

            match selector.input_mode {
                InputMode::Normal => {
                    if selector.workouts.is_empty() {
                        let empty_msg = Paragraph::new(
                            "No workouts found.\nPress 'n' to create your first workout!",
                        )
                        .style(Style::default().fg(Color::Gray))
                        .block(Block::default().borders(Borders::ALL).title("Workouts"));
                        frame.render_widget(empty_msg, chunks[1]);
                    } else {
                        let items: Vec<ListItem> = selector
                            .workouts
                            .iter()
                            .enumerate()
                            .map(|(idx, workout)| {
                                let content = format!(
                                    "{} - created {}",
                                    workout.name,
                                    workout.created_at.format("%Y-%m-%d")
                                );

                                let style = if idx == selector.selected {
                                    Style::default()
                                        .fg(Color::Black)
                                        .bg(Color::Cyan)
                                        .add_modifier(Modifier::BOLD)
                                } else {
                                    Style::default()
                                };

                                ListItem::new(content).style(style)
                            })
                            .collect();

                        let list = List::new(items).block(
                            Block::default()
                                .borders(Borders::ALL)
                                .title(format!("Workouts ({} total)", selector.workouts.len())),
                        );

                        let mut list_state = ListState::default();
                        list_state.select(Some(selector.selected));

                        frame.render_stateful_widget(list, chunks[1], &mut list_state);
                    }
                }
                InputMode::CreatingWorkout => {
                    let input_widget = Paragraph::new(selector.input_buffer.as_str())
                        .style(Style::default().fg(Color::Yellow))
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .title("New Workout Name"),
                        );
                    frame.render_widget(input_widget, chunks[1]);
                }
            }

            let footer = Paragraph::new(selector.status_message.as_str())
                .style(Style::default().fg(Color::White))
                .block(Block::default().borders(Borders::ALL).title("Status"));
            frame.render_widget(footer, chunks[2]);
        })?;

        if let Event::Key(key) = event::read()? {
            match selector.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        return Ok(None);
                    }
                    KeyCode::Char('j') | KeyCode::Down => {
                        selector.scroll_down();
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        selector.scroll_up();
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') => {
                        selector.enter_create_mode();
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') => {
                        selector.delete_selected().await?;
                    }
                    KeyCode::Enter => {
                        if let Some(workout) = selector.selected_workout() {
                            return Ok(Some(workout));
                        }
                    }
                    _ => {}
                },
                InputMode::CreatingWorkout => match key.code {
                    KeyCode::Enter => {
                        selector.create_workout().await?;
                    }
                    KeyCode::Esc => {
                        selector.input_mode = InputMode::Normal;
                        selector.input_buffer.clear();
                        selector.status_message = SELECTOR_HELP.to_string();
                    }
                    KeyCode::Char(c) => {
                        selector.input_buffer.push(c);
                    }
                    KeyCode::Backspace => {
                        selector.input_buffer.pop();
                    }
                    _ => {}
                },
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Training session screen
// ---------------------------------------------------------------------------

const RUNNER_HELP: &str =
    "j/k: navigate | Enter: log sets | o: note | t: rest timer | f: finish | q: abandon";

struct ExerciseRow {
    exercise: Exercise,
    best: String,
    visited: bool,
}

enum EntryField {
    Reps,
    Weight,
}

struct SetEntryForm {
    exercise_id: i64,
    exercise_name: String,
    config: ExerciseConfig,
    slot: i64,
    field: EntryField,
    pending_reps: i64,
    entries: Vec<SetEntry>,
    previous: Vec<SetRow>,
    input_buffer: String,
}

impl SetEntryForm {
    fn prompt(&self) -> String {
        let title = slot_title(self.slot, &self.config);
        let last = self.previous.iter().find(|r| r.slot == self.slot);
        match self.field {
            EntryField::Reps => {
                let hint = last
                    .map(|r| format!(" (last: {})", r.reps))
                    .unwrap_or_default();
                format!("{} reps{} | Enter: skip slot | Esc: cancel", title, hint)
            }
            EntryField::Weight => {
                let hint = last
                    .map(|r| format!(" (last: {:.1})", r.weight))
                    .unwrap_or_default();
                format!("{} kg{}", title, hint)
            }
        }
    }

    /// Moves to the next slot; true when the form is past the last one.
    fn advance_slot(&mut self) -> bool {
        self.slot += 1;
        self.field = EntryField::Reps;
        self.input_buffer.clear();
        self.slot >= self.config.total_slots()
    }
}

enum RunnerMode {
    Browsing,
    Entering(SetEntryForm),
    WritingNote {
        exercise_id: i64,
        exercise_name: String,
        input_buffer: String,
    },
}

enum RunnerAction {
    Continue,
    Finish,
    Quit,
}

struct WorkoutRunner<'a> {
    session: &'a Session,
    rows: Vec<ExerciseRow>,
    selected: usize,
    status_message: String,
    mode: RunnerMode,
    timer: RestTimer,
}

impl<'a> WorkoutRunner<'a> {
    async fn new(session: &'a Session, workout: &Workout) -> Result<Self> {
        let mut rows = Vec::new();
        for exercise in session.list_exercises(workout.id).await? {
            let best = session.personal_best(exercise.id).await?;
            rows.push(ExerciseRow {
                exercise,
                best: format_best(best.as_ref()),
                visited: false,
            });
        }

        let status_message = if rows.is_empty() {
            "This workout has no exercises yet. Add some with 'add-exercise'.".to_string()
        } else {
            RUNNER_HELP.to_string()
        };

        Ok(Self {
            session,
            rows,
            selected: 0,
            status_message,
            mode: RunnerMode::Browsing,
            timer: RestTimer::default(),
        })
    }

    fn scroll_down(&mut self) {
        if !self.rows.is_empty() && self.selected < self.rows.len() - 1 {
            self.selected += 1;
        }
    }

    fn scroll_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    async fn open_selected(&mut self) -> Result<()> {
        let Some(row) = self.rows.get(self.selected) else {
            return Ok(());
        };
        let overview = self.session.exercise_overview(row.exercise.id).await?;

        let form = SetEntryForm {
            exercise_id: overview.exercise.id,
            exercise_name: overview.exercise.name.clone(),
            config: overview.config,
            slot: 0,
            field: EntryField::Reps,
            pending_reps: 0,
            entries: Vec::new(),
            previous: overview.recent_sets,
            input_buffer: String::new(),
        };
        self.status_message = match overview.latest_note {
            Some(note) => format!("Note: {}", note),
            None => "Log each slot; blank reps skips it.".to_string(),
        };
        self.mode = RunnerMode::Entering(form);
        Ok(())
    }

    async fn save_form(&mut self, form: SetEntryForm) -> Result<()> {
        if form.entries.is_empty() {
            self.status_message = "No sets entered; nothing saved.".to_string();
            return Ok(());
        }

        match self
            .session
            .save_exercise_sets(form.exercise_id, &form.entries)
            .await
        {
            Ok(outcome) => {
                self.status_message = if outcome.new_pb {
                    format!(
                        "Saved {} sets for {}. New PB! 🏆",
                        outcome.saved, form.exercise_name
                    )
                } else {
                    format!("Saved {} sets for {}.", outcome.saved, form.exercise_name)
                };

                let best = self.session.personal_best(form.exercise_id).await?;
                if let Some(row) = self
                    .rows
                    .iter_mut()
                    .find(|r| r.exercise.id == form.exercise_id)
                {
                    row.visited = true;
                    row.best = format_best(best.as_ref());
                }
            }
            Err(e) => {
                self.status_message = format!("Could not save sets: {}", e);
            }
        }
        Ok(())
    }

    async fn handle_browsing_key(&mut self, key: KeyEvent) -> Result<RunnerAction> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(RunnerAction::Quit),
            KeyCode::Char('f') | KeyCode::Char('F') => return Ok(RunnerAction::Finish),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::Enter => self.open_selected().await?,
            KeyCode::Char('o') | KeyCode::Char('O') => {
                if let Some(row) = self.rows.get(self.selected) {
                    self.mode = RunnerMode::WritingNote {
                        exercise_id: row.exercise.id,
                        exercise_name: row.exercise.name.clone(),
                        input_buffer: String::new(),
                    };
                    self.status_message = "Enter note | Esc: cancel".to_string();
                }
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.timer.start(DEFAULT_REST);
                self.status_message = "Rest timer started.".to_string();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.timer.reset();
                self.status_message = RUNNER_HELP.to_string();
            }
            _ => {}
        }
        Ok(RunnerAction::Continue)
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<RunnerAction> {
        if matches!(self.mode, RunnerMode::Browsing) {
            return self.handle_browsing_key(key).await;
        }

        match &mut self.mode {
            RunnerMode::Browsing => {}
            RunnerMode::Entering(form) => {
                let mut parse_error = false;
                let mut finished_form = false;
                match key.code {
                    KeyCode::Enter => match form.field {
                        EntryField::Reps => {
                            if form.input_buffer.is_empty() {
                                finished_form = form.advance_slot();
                            } else {
                                match form.input_buffer.parse::<i64>() {
                                    Ok(reps) => {
                                        form.pending_reps = reps;
                                        form.field = EntryField::Weight;
                                        form.input_buffer.clear();
                                    }
                                    Err(_) => parse_error = true,
                                }
                            }
                        }
                        EntryField::Weight => {
                            let parsed = if form.input_buffer.is_empty() {
                                Ok(0.0)
                            } else {
                                form.input_buffer.parse::<f64>()
                            };
                            match parsed {
                                Ok(weight) => {
                                    form.entries.push(SetEntry {
                                        slot: form.slot,
                                        reps: form.pending_reps,
                                        weight,
                                    });
                                    finished_form = form.advance_slot();
                                }
                                Err(_) => parse_error = true,
                            }
                        }
                    },
                    KeyCode::Esc => {
                        self.mode = RunnerMode::Browsing;
                        self.status_message = RUNNER_HELP.to_string();
                        return Ok(RunnerAction::Continue);
                    }
                    KeyCode::Char(c) => {
                        let weight_field = matches!(form.field, EntryField::Weight);
                        if c.is_ascii_digit() || (weight_field && c == '.') {
                            form.input_buffer.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        form.input_buffer.pop();
                    }
                    _ => {}
                }

                if parse_error {
                    self.status_message = "Enter a number.".to_string();
                } else if finished_form {
                    if let RunnerMode::Entering(form) =
                        std::mem::replace(&mut self.mode, RunnerMode::Browsing)
                    {
                        self.save_form(form).await?;
                    }
                }
            }
            RunnerMode::WritingNote {
                exercise_id,
                exercise_name,
                input_buffer,
            } => match key.code {
                KeyCode::Enter => {
                    let exercise_id = *exercise_id;
                    let exercise_name = exercise_name.clone();
                    let note = input_buffer.clone();
                    self.mode = RunnerMode::Browsing;
                    match self.session.save_note(exercise_id, &note).await {
                        Ok(_) => {
                            self.status_message = format!("Note saved for {}.", exercise_name);
                        }
                        Err(e) => {
                            self.status_message = format!("Could not save note: {}", e);
                        }
                    }
                }
                KeyCode::Esc => {
                    self.mode = RunnerMode::Browsing;
                    self.status_message = RUNNER_HELP.to_string();
                }
                KeyCode::Char(c) => {
                    input_buffer.push(c);
                }
                KeyCode::Backspace => {
                    input_buffer.pop();
                }
                _ => {}
            },
        }
        Ok(RunnerAction::Continue)
    }
}

async fn run_workout_session(
    mut terminal: DefaultTerminal,
    session: &Session,
    workout: &Workout,
) -> Result<bool> {
    let mut runner = WorkoutRunner::new(session, workout).await?;

    loop {
        if runner.timer.just_expired() {
            runner.status_message = "Time's up! ⏱️".to_string();
        }

        terminal.draw(|frame| {
            let chunks = Layout::vertical([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(frame.area());

            let header_text = match runner.timer.display() {
                Some(rest) => format!("{} | rest {}", workout.name, rest),
                None => workout.name.clone(),
            };
            let header = Paragraph::new(header_text)
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(header, chunks[0]);

            match &runner.mode {
                RunnerMode::Browsing => {
                    if runner.rows.is_empty() {
                        let empty_msg = Paragraph::new("No exercises in this workout.")
                            .style(Style::default().fg(Color::Gray))
                            .block(Block::default().borders(Borders::ALL).title("Exercises"));
                        frame.render_widget(empty_msg, chunks[1]);
                    } else {
                        let items: Vec<ListItem> = runner
                            .rows
                            .iter()
                            .enumerate()
                            .map(|(idx, row)| {
                                let mark = if row.visited { " ✓" } else { "" };
                                let content = format!(
                                    "{} | PB: {}{}",
                                    row.exercise.name, row.best, mark
                                );

                                let style = if idx == runner.selected {
                                    Style::default()
                                        .fg(Color::Black)
                                        .bg(Color::Cyan)
                                        .add_modifier(Modifier::BOLD)
                                } else {
                                    Style::default()
                                };

                                ListItem::new(content).style(style)
                            })
                            .collect();

                        let list = List::new(items).block(
                            Block::default().borders(Borders::ALL).title("Exercises"),
                        );

                        let mut list_state = ListState::default();
                        list_state.select(Some(runner.selected));

                        frame.render_stateful_widget(list, chunks[1], &mut list_state);
                    }
                }
                RunnerMode::Entering(form) => {
                    let input_widget = Paragraph::new(form.input_buffer.as_str())
                        .style(Style::default().fg(Color::Yellow))
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .title(format!("{}: {}", form.exercise_name, form.prompt())),
                        );
                    frame.render_widget(input_widget, chunks[1]);
                }
                RunnerMode::WritingNote {
                    exercise_name,
                    input_buffer,
                    ..
                } => {
                    let input_widget = Paragraph::new(input_buffer.as_str())
                        .style(Style::default().fg(Color::Yellow))
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .title(format!("Note for {}", exercise_name)),
                        );
                    frame.render_widget(input_widget, chunks[1]);
                }
            }

            let footer = Paragraph::new(runner.status_message.as_str())
                .style(Style::default().fg(Color::White))
                .block(Block::default().borders(Borders::ALL).title("Status"));
            frame.render_widget(footer, chunks[2]);
        })?;

        // Poll so the rest timer keeps counting between key presses.
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                match runner.handle_key(key).await? {
                    RunnerAction::Continue => {}
                    RunnerAction::Finish => return Ok(true),
                    RunnerAction::Quit => return Ok(false),
                }
            }
        }
    }
}

async fn run_interactive(session: &Session) -> Result<()> {
    let terminal = ratatui::init();
    let picked = run_workout_selector(terminal, session).await;
    ratatui::restore();

    let Some(workout) = picked? else {
        println!("Exited without starting a workout");
        return Ok(());
    };

    session.begin_workout(workout.id).await?;

    let terminal = ratatui::init();
    let finished = run_workout_session(terminal, session, &workout).await;
    ratatui::restore();

    if finished? {
        let report = session.finish_workout().await?;
        println!(
            "Session complete: {} exercise(s) logged.",
            report.exercises_completed
        );
        if report.pb_count > 0 {
            println!(
                "New personal bests ({}): {}",
                report.pb_count,
                report.pb_exercises.join(", ")
            );
        } else {
            println!("No new personal bests this time.");
        }
        println!("\n{}", quotes::random_quote());
    } else {
        session.abandon_workout().await?;
        println!("Workout abandoned. Saved sets were kept.");
    }
    Ok(())
}

async fn print_history(session: &Session, summaries: Vec<SessionSummary>) {
    if summaries.is_empty() {
        println!("No sessions logged yet.");
        return;
    }

    for summary in summaries {
        println!(
            "{} | {} | {} PB(s)",
            summary.label, summary.workout_name, summary.pb_count
        );
        for breakdown in &summary.exercises {
            let config = session.exercise_config(breakdown.exercise_id).await;
            let mark = if breakdown.new_pb { " 🏆" } else { "" };
            println!("  {}{}", breakdown.exercise_name, mark);
            for set in &breakdown.sets {
                let title = if set.warmup {
                    "Warm-up".to_string()
                } else if config.has_warmup {
                    format!("Set {}", set.slot)
                } else {
                    format!("Set {}", set.slot + 1)
                };
                println!("    {}: {:.1}kg x {} reps", title, set.weight, set.reps);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let session = Session::new(&db_path()).await?;

    match args.command {
        Commands::Interactive => run_interactive(&session).await?,
        Commands::ListWorkouts { verbose } => {
            for workout in session.list_workouts().await? {
                println!("{}, {}", workout.id, workout.name);
                if verbose {
                    for exercise in session.list_exercises(workout.id).await? {
                        let best = session.personal_best(exercise.id).await?;
                        println!(
                            "\t{} (#{}) PB: {}",
                            exercise.name,
                            exercise.id,
                            format_best(best.as_ref())
                        );
                    }
                }
            }
        }
        Commands::CreateWorkout { name } => {
            let workout = session.create_workout(&name).await?;
            println!("Created workout #{}: {}", workout.id, workout.name);
        }
        Commands::RenameWorkout { id, name } => {
            let workout = session.rename_workout(id, &name).await?;
            println!("Renamed workout #{} to {}", workout.id, workout.name);
        }
        Commands::DeleteWorkout { id } => {
            let removed = session.delete_workout(id).await?;
            if removed == 0 {
                println!("No workout with id {}", id);
            } else {
                println!("Deleted workout #{}", id);
            }
        }
        Commands::AddExercise {
            workout_id,
            name,
            sets,
            no_warmup,
        } => {
            let config = ExerciseConfig {
                set_count: sets,
                has_warmup: !no_warmup,
            };
            let exercise = session.add_exercise(workout_id, &name, config).await?;
            println!(
                "Added exercise #{}: {} ({} sets{})",
                exercise.id,
                exercise.name,
                sets,
                if no_warmup { "" } else { " + warm-up" }
            );
        }
        Commands::RenameExercise { id, name } => {
            let exercise = session.rename_exercise(id, &name).await?;
            println!("Renamed exercise #{} to {}", exercise.id, exercise.name);
        }
        Commands::DeleteExercise { id } => {
            let removed = session.delete_exercise(id).await?;
            if removed == 0 {
                println!("No exercise with id {}", id);
            } else {
                println!("Deleted exercise #{}", id);
            }
        }
        Commands::AddNote { exercise_id, note } => {
            session.save_note(exercise_id, &note).await?;
            println!("Note saved.");
        }
        Commands::History { json } => {
            let summaries = session.session_history().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print_history(&session, summaries).await;
            }
        }
    }

    Ok(())
}
