use lint_dashboard::{
    DASHBOARD_PANEL_NAME, DASHBOARD_SYNTAX, Dashboard, DashboardCommand, DashboardConfig,
    DashboardError, EditorHost, HostError, LOADING_PLACEHOLDER, LineDiagnostic, LintState,
    MemoryHost, NO_DIAGNOSTICS_LINE, PanelOptions, Region, ShowMode, ViewId, WindowId,
};
use pretty_assertions::assert_eq;

/// Delegates to [`MemoryHost`] but rejects every content replace.
struct RejectingHost(MemoryHost);

impl EditorHost for RejectingHost {
    fn windows(&self) -> Vec<WindowId> {
        self.0.windows()
    }
    fn active_window(&self) -> Option<WindowId> {
        self.0.active_window()
    }
    fn views(&self, window: WindowId) -> Vec<ViewId> {
        self.0.views(window)
    }
    fn window_of(&self, view: ViewId) -> Option<WindowId> {
        self.0.window_of(view)
    }
    fn view_name(&self, view: ViewId) -> Option<String> {
        self.0.view_name(view)
    }
    fn file_name(&self, view: ViewId) -> Option<String> {
        self.0.file_name(view)
    }
    fn create_panel(
        &mut self,
        window: WindowId,
        options: &PanelOptions,
    ) -> Result<ViewId, HostError> {
        self.0.create_panel(window, options)
    }
    fn close_view(&mut self, view: ViewId) -> bool {
        self.0.close_view(view)
    }
    fn focus_view(&mut self, view: ViewId) -> Result<(), HostError> {
        self.0.focus_view(view)
    }
    fn focused_view(&self, window: WindowId) -> Option<ViewId> {
        self.0.focused_view(window)
    }
    fn focus_last_editor(&mut self, window: WindowId, excluding: ViewId) -> bool {
        self.0.focus_last_editor(window, excluding)
    }
    fn is_read_only(&self, view: ViewId) -> Result<bool, HostError> {
        self.0.is_read_only(view)
    }
    fn set_read_only(&mut self, view: ViewId, read_only: bool) -> Result<(), HostError> {
        self.0.set_read_only(view, read_only)
    }
    fn replace_all(&mut self, view: ViewId, _text: &str) -> Result<(), HostError> {
        Err(HostError::ReadOnly(view))
    }
    fn text(&self, view: ViewId) -> Result<String, HostError> {
        self.0.text(view)
    }
    fn text_point(&self, view: ViewId, line: usize, column: usize) -> Result<usize, HostError> {
        self.0.text_point(view, line, column)
    }
    fn row_col(&self, view: ViewId, point: usize) -> Result<(usize, usize), HostError> {
        self.0.row_col(view, point)
    }
    fn selections(&self, view: ViewId) -> Result<Vec<Region>, HostError> {
        self.0.selections(view)
    }
    fn set_selection(&mut self, view: ViewId, region: Region) -> Result<(), HostError> {
        self.0.set_selection(view, region)
    }
    fn show(&mut self, view: ViewId, point: usize, mode: ShowMode) -> Result<(), HostError> {
        self.0.show(view, point, mode)
    }
}

#[test]
fn test_show_creates_panel_once() {
    let mut host = MemoryHost::new();
    let window = host.open_window();
    let source = host.open_file(window, "a.rs", "").unwrap();
    let dashboard = Dashboard::default();

    let panel = dashboard.show(&mut host).unwrap();
    assert_eq!(host.view_name(panel).as_deref(), Some(DASHBOARD_PANEL_NAME));
    assert!(host.is_read_only(panel).unwrap());
    assert!(host.is_scratch(panel).unwrap());
    assert_eq!(host.syntax(panel).unwrap().as_deref(), Some(DASHBOARD_SYNTAX));
    assert_eq!(host.focused_view(window), Some(panel));

    host.focus_view(source).unwrap();
    assert_eq!(dashboard.show(&mut host).unwrap(), panel);
    assert_eq!(host.views(window), vec![source, panel]);
    assert_eq!(host.focused_view(window), Some(panel));
}

#[test]
fn test_show_without_window_fails() {
    let mut host = MemoryHost::new();
    assert_eq!(
        Dashboard::default().show(&mut host),
        Err(DashboardError::NoActiveWindow)
    );
}

#[test]
fn test_write_restores_read_only() {
    let mut host = MemoryHost::new();
    host.open_window();
    let dashboard = Dashboard::default();
    let panel = dashboard.show(&mut host).unwrap();

    dashboard.write(&mut host, panel, "hello\nworld").unwrap();

    assert_eq!(host.text(panel).unwrap(), "hello\nworld");
    assert!(host.is_read_only(panel).unwrap());
    assert_eq!(
        host.replace_all(panel, "hand edit"),
        Err(HostError::ReadOnly(panel))
    );
}

#[test]
fn test_write_restores_read_only_when_replace_fails() {
    let mut host = RejectingHost(MemoryHost::new());
    host.0.open_window();
    let dashboard = Dashboard::default();
    let panel = dashboard.show(&mut host).unwrap();

    let result = dashboard.write(&mut host, panel, "new text");

    assert_eq!(
        result,
        Err(DashboardError::Host(HostError::ReadOnly(panel)))
    );
    assert!(host.is_read_only(panel).unwrap());
}

#[test]
fn test_failed_refresh_keeps_previous_index() {
    let mut host = RejectingHost(MemoryHost::new());
    let window = host.0.open_window();
    let source = host.0.open_file(window, "a.rs", "x\n").unwrap();
    let mut dashboard = Dashboard::default();
    dashboard.show(&mut host).unwrap();

    let mut lint = LintState::new();
    lint.errors.push(source, 0, LineDiagnostic::new(0, "boom"));

    assert!(dashboard.refresh(&mut host, &lint).is_err());
    assert!(dashboard.navigation_index().is_empty());
    assert_eq!(dashboard.state().text(), "");
}

#[test]
fn test_refresh_without_panel_is_a_no_op() {
    let mut host = MemoryHost::new();
    let window = host.open_window();
    host.open_file(window, "a.rs", "").unwrap();
    let mut dashboard = Dashboard::default();

    assert_eq!(dashboard.refresh(&mut host, &LintState::new()), Ok(None));
    assert_eq!(host.views(window).len(), 1);
    assert!(dashboard.navigation_index().is_empty());
}

#[test]
fn test_clear_all_writes_placeholder_to_every_panel() {
    let mut host = MemoryHost::new();
    let mut dashboard = Dashboard::default();
    let lint = LintState::new();

    let first = host.open_window();
    host.open_file(first, "a.rs", "").unwrap();
    let first_panel = dashboard.show(&mut host).unwrap();
    dashboard.refresh(&mut host, &lint).unwrap();

    let second = host.open_window();
    let second_panel = dashboard.show(&mut host).unwrap();
    dashboard.refresh(&mut host, &lint).unwrap();

    let third = host.open_window();
    host.open_file(third, "c.rs", "untouched").unwrap();

    assert_eq!(dashboard.clear_all(&mut host), 2);
    assert_eq!(host.text(first_panel).unwrap(), LOADING_PLACEHOLDER);
    assert_eq!(host.text(second_panel).unwrap(), LOADING_PLACEHOLDER);
    assert!(host.is_read_only(first_panel).unwrap());
    assert_eq!(host.views(third).len(), 1);
    assert_eq!(dashboard.find_panel(&host, second), Some(second_panel));
}

#[test]
fn test_refresh_only_touches_active_window() {
    let mut host = MemoryHost::new();
    let mut dashboard = Dashboard::default();
    let mut lint = LintState::new();

    let first = host.open_window();
    let source = host.open_file(first, "src/a.rs", "x\n").unwrap();
    let first_panel = dashboard.show(&mut host).unwrap();

    host.open_window();
    let second_panel = dashboard.show(&mut host).unwrap();
    dashboard.clear_all(&mut host);

    lint.errors.push(source, 0, LineDiagnostic::new(0, "boom"));
    dashboard.refresh(&mut host, &lint).unwrap();

    // The second window does not have `src/a.rs` open.
    assert!(host.text(second_panel).unwrap().ends_with(NO_DIAGNOSTICS_LINE));
    assert_eq!(host.text(first_panel).unwrap(), LOADING_PLACEHOLDER);

    host.focus_view(first_panel).unwrap();
    dashboard.refresh(&mut host, &lint).unwrap();
    assert!(host.text(first_panel).unwrap().contains("    1: boom"));
}

#[test]
fn test_toggles_are_shared_across_windows() {
    let mut host = MemoryHost::new();
    let mut dashboard = Dashboard::default();
    let lint = LintState::new();

    host.open_window();
    dashboard.show(&mut host).unwrap();
    dashboard
        .execute(&mut host, &lint, DashboardCommand::ToggleWarnings)
        .unwrap();
    assert!(!dashboard.state().show_warnings);

    host.open_window();
    dashboard
        .execute(&mut host, &lint, DashboardCommand::Open)
        .unwrap();
    assert!(!dashboard.state().show_warnings);
}

#[test]
fn test_custom_panel_name() {
    let mut host = MemoryHost::new();
    host.open_window();
    let dashboard = Dashboard::new(DashboardConfig {
        panel_name: "Problems".to_string(),
        syntax: None,
        ..DashboardConfig::default()
    });

    let panel = dashboard.show(&mut host).unwrap();
    assert_eq!(host.view_name(panel).as_deref(), Some("Problems"));
    assert_eq!(host.syntax(panel).unwrap(), None);
    assert!(!Dashboard::default().is_panel(&host, panel));
}

#[test]
fn test_write_command_targets_active_panel() {
    let mut host = MemoryHost::new();
    host.open_window();
    let mut dashboard = Dashboard::default();
    let lint = LintState::new();

    let result = dashboard
        .execute(
            &mut host,
            &lint,
            DashboardCommand::Write {
                text: "ignored".to_string(),
            },
        )
        .unwrap();
    assert_eq!(result, lint_dashboard::CommandResult::Ignored);

    let panel = dashboard.show(&mut host).unwrap();
    dashboard
        .execute(
            &mut host,
            &lint,
            DashboardCommand::Write {
                text: "custom".to_string(),
            },
        )
        .unwrap();
    assert_eq!(host.text(panel).unwrap(), "custom");
    assert_eq!(dashboard.state().text(), "custom");
}

#[test]
fn test_written_text_replaces_the_navigation_index() {
    let mut host = MemoryHost::new();
    let window = host.open_window();
    let source = host.open_file(window, "src/lib.rs", "fn f() {}\n").unwrap();
    let mut lint = LintState::new();
    lint.errors.push(source, 0, LineDiagnostic::new(3, "bad"));

    let mut dashboard = Dashboard::default();
    let lint_dashboard::CommandResult::Rendered { panel } = dashboard
        .execute(&mut host, &lint, DashboardCommand::Open)
        .unwrap()
    else {
        panic!("dashboard not rendered");
    };
    assert!(dashboard.navigation_index().entries().iter().any(Option::is_some));

    let result = dashboard
        .execute(
            &mut host,
            &lint,
            DashboardCommand::Write {
                text: "one\ntwo\nthree".to_string(),
            },
        )
        .unwrap();
    assert_eq!(result, lint_dashboard::CommandResult::Success);

    assert_eq!(dashboard.state().text(), "one\ntwo\nthree");
    let index = dashboard.navigation_index();
    assert_eq!(index.len(), host.line_count(panel).unwrap());
    assert!(index.entries().iter().all(Option::is_none));

    // The line that used to hold the diagnostic no longer navigates.
    for line in 0..3 {
        host.move_caret(panel, line, 0).unwrap();
        let result = dashboard
            .execute(&mut host, &lint, DashboardCommand::Jump)
            .unwrap();
        assert_eq!(result, lint_dashboard::CommandResult::Ignored);
    }
    assert_eq!(host.focused_view(window), Some(panel));

    // The next refresh makes the panel navigable again.
    dashboard.refresh(&mut host, &lint).unwrap();
    assert!(dashboard.state().text().contains("    1: bad"));
    assert!(dashboard.navigation_index().entries().iter().any(Option::is_some));
}
