//! Main loop: poll the collectors on a tick, render, handle keys.

use std::io;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::collector::traits::FileSystem;
use crate::collector::{ProcessCollector, SystemCollector};
use crate::model::{ProcessSnapshot, SystemOverview};
use crate::rates::{CpuRateState, cpu_utilization};

use super::event::{Event, EventHandler};
use super::render::render;

/// The monitor application: collectors plus the last collected view.
pub struct App<F: FileSystem> {
    system: SystemCollector<F>,
    processes: ProcessCollector<F>,
    cpu_state: CpuRateState,
    os_name: String,
    kernel_version: String,
    overview: SystemOverview,
    table: Vec<ProcessSnapshot>,
    should_quit: bool,
}

impl<F: FileSystem + Clone> App<F> {
    /// Creates the application over the given filesystem and proc root.
    ///
    /// OS name and kernel release are read once here; they do not change
    /// while the monitor runs.
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        let proc_path = proc_path.into();
        let system = SystemCollector::new(fs.clone(), &proc_path);
        let processes = ProcessCollector::new(fs, &proc_path);
        let os_name = system.os_name();
        let kernel_version = system.kernel_version();

        Self {
            system,
            processes,
            cpu_state: CpuRateState::new(),
            os_name,
            kernel_version,
            overview: SystemOverview::default(),
            table: Vec::new(),
            should_quit: false,
        }
    }

    /// Runs the terminal loop until the user quits.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        self.refresh();

        loop {
            terminal.draw(|frame| render(frame, &self.overview, &self.table))?;

            match events.next() {
                Ok(Event::Tick) => self.refresh(),
                Ok(Event::Key(key)) => self.handle_key(key),
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Collects one coherent view: the overview first (its CPU sample
    /// feeds the rate state), then a snapshot per listed PID, ranked by
    /// CPU. A PID that vanished after listing shows up zeroed for this
    /// cycle and disappears on the next.
    fn refresh(&mut self) {
        let cpu = self
            .system
            .aggregate_cpu()
            .map(|sample| cpu_utilization(&mut self.cpu_state, &sample))
            .unwrap_or(0.0);

        self.overview = SystemOverview {
            os_name: self.os_name.clone(),
            kernel_version: self.kernel_version.clone(),
            cpu_utilization: cpu,
            memory_utilization: self.system.memory_utilization(),
            total_processes: self.system.total_processes(),
            running_processes: self.system.running_processes(),
            uptime_seconds: self.system.uptime_seconds(),
        };

        let mut table: Vec<ProcessSnapshot> = self
            .system
            .pids()
            .into_iter()
            .map(|pid| self.processes.collect(pid))
            .collect();
        table.sort_by(ProcessSnapshot::top_order);

        debug!(processes = table.len(), "refreshed");
        self.table = table;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => {}
        }
    }
}
