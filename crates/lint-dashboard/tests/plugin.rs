use lint_dashboard::{
    CommandResult, DashboardCommand, DashboardConfig, DashboardPlugin, EditorHost, HighlightSpan,
    LOADING_PLACEHOLDER, LineDiagnostic, LintEngine, LintReport, MemoryHost, NO_DIAGNOSTICS_LINE,
    Severity, ViewId, WindowId,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

struct Fixture {
    host: Rc<RefCell<MemoryHost>>,
    engine: LintEngine,
    plugin: DashboardPlugin<MemoryHost>,
    window: WindowId,
    source: ViewId,
}

fn fixture() -> Fixture {
    let host = Rc::new(RefCell::new(MemoryHost::new()));
    let (window, source) = {
        let mut host = host.borrow_mut();
        let window = host.open_window();
        let source = host
            .open_file(window, "src/lib.rs", "pub fn f() {}\npub fn g() {}\n")
            .unwrap();
        (window, source)
    };
    let plugin = DashboardPlugin::new(Rc::clone(&host), DashboardConfig::default());

    Fixture {
        host,
        engine: LintEngine::new(),
        plugin,
        window,
        source,
    }
}

fn error_report(view: ViewId, line: usize, message: &str) -> LintReport {
    let mut report = LintReport::clean(view);
    report
        .errors
        .insert(line, vec![LineDiagnostic::new(0, message)]);
    report
        .highlights
        .push(HighlightSpan::new(Severity::Error, [line]));
    report
}

fn panel_text(fx: &Fixture) -> String {
    let host = fx.host.borrow();
    let panel = fx.plugin.dashboard().find_panel(&*host, fx.window).unwrap();
    host.text(panel).unwrap()
}

#[test]
fn test_start_clears_panels_and_renders_active_one() {
    let mut fx = fixture();

    // A panel left over in a background window, plus one in the active window.
    let background = fx.host.borrow_mut().open_window();
    fx.plugin.run(fx.engine.state(), DashboardCommand::Open);
    fx.host.borrow_mut().focus_view(fx.source).unwrap();
    fx.plugin.run(fx.engine.state(), DashboardCommand::Open);

    fx.plugin.start(&mut fx.engine);
    assert!(fx.plugin.is_hooked());

    let host = fx.host.borrow();
    let dashboard = fx.plugin.dashboard();
    let background_panel = dashboard.find_panel(&*host, background).unwrap();
    assert_eq!(host.text(background_panel).unwrap(), LOADING_PLACEHOLDER);
    let active_panel = dashboard.find_panel(&*host, fx.window).unwrap();
    assert!(host.text(active_panel).unwrap().ends_with(NO_DIAGNOSTICS_LINE));
}

#[test]
fn test_highlight_refreshes_until_stopped() {
    let mut fx = fixture();
    fx.plugin.start(&mut fx.engine);
    fx.plugin.run(fx.engine.state(), DashboardCommand::Open);

    fx.engine
        .highlight(error_report(fx.source, 1, "expected `;`"));
    assert!(panel_text(&fx).contains(" !  2: expected `;`"));

    fx.plugin.stop(&mut fx.engine);
    assert!(!fx.plugin.is_hooked());

    fx.engine.highlight(LintReport::clean(fx.source));
    assert!(panel_text(&fx).contains(" !  2: expected `;`"));
    assert!(fx.engine.state().errors.get(fx.source).unwrap().is_empty());
}

#[test]
fn test_post_save_refreshes() {
    let mut fx = fixture();
    fx.plugin.run(fx.engine.state(), DashboardCommand::Open);

    // Not hooked: the registry changes silently.
    fx.engine.highlight(error_report(fx.source, 0, "saved error"));
    assert!(!panel_text(&fx).contains("saved error"));

    fx.plugin.on_post_save(fx.engine.state());
    assert!(panel_text(&fx).contains(" !  1: saved error"));
}

#[test]
fn test_close_and_unfocus() {
    let fx = fixture();
    let lint = fx.engine.state();

    let CommandResult::Rendered { panel } = fx.plugin.run(lint, DashboardCommand::Open) else {
        panic!("dashboard not rendered");
    };
    assert_eq!(fx.host.borrow().focused_view(fx.window), Some(panel));

    assert_eq!(
        fx.plugin.run(lint, DashboardCommand::Unfocus),
        CommandResult::Success
    );
    assert_eq!(fx.host.borrow().focused_view(fx.window), Some(fx.source));
    assert_eq!(fx.host.borrow().views(fx.window), vec![fx.source, panel]);

    fx.host.borrow_mut().focus_view(panel).unwrap();
    assert_eq!(
        fx.plugin.run(lint, DashboardCommand::Close),
        CommandResult::Success
    );
    assert_eq!(fx.host.borrow().views(fx.window), vec![fx.source]);
    assert_eq!(fx.host.borrow().focused_view(fx.window), Some(fx.source));

    // Nothing left to close.
    assert_eq!(
        fx.plugin.run(lint, DashboardCommand::Close),
        CommandResult::Ignored
    );
}

#[test]
fn test_toggles_through_run() {
    let mut fx = fixture();
    fx.plugin.start(&mut fx.engine);
    fx.plugin.run(fx.engine.state(), DashboardCommand::Open);

    let mut report = LintReport::clean(fx.source);
    report
        .errors
        .insert(0, vec![LineDiagnostic::new(0, "just a warning")]);
    fx.engine.highlight(report);
    assert!(panel_text(&fx).contains("    1: just a warning"));

    fx.plugin
        .run(fx.engine.state(), DashboardCommand::ToggleWarnings);
    assert!(!panel_text(&fx).contains("just a warning"));
    assert!(panel_text(&fx).contains("lib.rs/src:"));

    fx.plugin.run(fx.engine.state(), DashboardCommand::ToggleHelp);
    assert!(panel_text(&fx).contains("Key bindings"));
    assert!(!panel_text(&fx).contains("lib.rs/src:"));

    fx.plugin.run(fx.engine.state(), DashboardCommand::ToggleHelp);
    fx.plugin
        .run(fx.engine.state(), DashboardCommand::ToggleWarnings);
    assert!(panel_text(&fx).contains("    1: just a warning"));
}

#[test]
fn test_run_without_window_is_ignored() {
    let host = Rc::new(RefCell::new(MemoryHost::new()));
    let plugin = DashboardPlugin::new(Rc::clone(&host), DashboardConfig::default());
    let engine = LintEngine::new();

    assert_eq!(
        plugin.run(engine.state(), DashboardCommand::Open),
        CommandResult::Ignored
    );
    assert_eq!(
        plugin.run(engine.state(), DashboardCommand::Jump),
        CommandResult::Ignored
    );
}

#[test]
fn test_closed_document_disappears_after_refresh() {
    let mut fx = fixture();
    fx.plugin.start(&mut fx.engine);
    fx.plugin.run(fx.engine.state(), DashboardCommand::Open);
    fx.engine.highlight(error_report(fx.source, 0, "gone soon"));
    assert!(panel_text(&fx).contains("gone soon"));

    fx.host.borrow_mut().close_view(fx.source);
    fx.plugin.refresh(fx.engine.state());

    assert!(!panel_text(&fx).contains("gone soon"));
    assert!(panel_text(&fx).ends_with(NO_DIAGNOSTICS_LINE));
}

#[test]
fn test_refresh_while_host_is_borrowed_is_skipped() {
    let mut fx = fixture();
    fx.plugin.run(fx.engine.state(), DashboardCommand::Open);
    fx.engine.highlight(error_report(fx.source, 0, "late"));

    {
        let _busy = fx.host.borrow_mut();
        fx.plugin.refresh(fx.engine.state());
    }
    assert!(!panel_text(&fx).contains("late"));

    fx.plugin.refresh(fx.engine.state());
    assert!(panel_text(&fx).contains("late"));
}
