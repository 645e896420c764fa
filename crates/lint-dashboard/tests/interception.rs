use lint_dashboard::{
    HighlightFn, HighlightInterceptor, LineDiagnostic, LintEngine, LintReport, LintState,
    RefreshListener, ViewId,
};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

fn counting_listener() -> (RefreshListener, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let listener: RefreshListener = Rc::new(move |_: &LintState| counter.set(counter.get() + 1));
    (listener, calls)
}

fn report(view: ViewId, message: &str) -> LintReport {
    let mut report = LintReport::clean(view);
    report
        .errors
        .insert(0, vec![LineDiagnostic::new(0, message)]);
    report
}

#[test]
fn test_uninstall_restores_identical_routine() {
    let mut engine = LintEngine::new();
    let original = engine.highlight_routine();
    let (listener, _) = counting_listener();

    let mut interceptor = HighlightInterceptor::new();
    assert!(interceptor.install(&mut engine, listener));
    assert!(interceptor.is_installed());
    assert!(!Rc::ptr_eq(&engine.highlight_routine(), &original));
    assert!(Rc::ptr_eq(interceptor.original().unwrap(), &original));

    assert!(interceptor.uninstall(&mut engine));
    assert!(!interceptor.is_installed());
    assert!(Rc::ptr_eq(&engine.highlight_routine(), &original));
}

#[test]
fn test_listener_sees_updated_registry() {
    let view = ViewId::from_raw(1);
    let mut engine = LintEngine::new();
    let seen = Rc::new(Cell::new(0));
    let observed = Rc::clone(&seen);
    let listener: RefreshListener = Rc::new(move |state: &LintState| {
        observed.set(state.errors.get(view).map_or(0, |errors| errors.len()));
    });

    let mut interceptor = HighlightInterceptor::new();
    interceptor.install(&mut engine, listener);
    engine.highlight(report(view, "boom"));

    assert_eq!(seen.get(), 1);
}

#[test]
fn test_uninstalled_listener_is_not_called() {
    let view = ViewId::from_raw(1);
    let mut engine = LintEngine::new();
    let (listener, calls) = counting_listener();

    let mut interceptor = HighlightInterceptor::new();
    interceptor.install(&mut engine, listener);
    engine.highlight(report(view, "first"));
    interceptor.uninstall(&mut engine);
    engine.highlight(report(view, "second"));

    assert_eq!(calls.get(), 1);
    let errors = engine.state().errors.get(view).unwrap();
    assert_eq!(errors[&0][0].message, "second");
}

#[test]
fn test_double_install_is_a_no_op() {
    let mut engine = LintEngine::new();
    let (first, calls) = counting_listener();
    let (second, second_calls) = counting_listener();

    let mut interceptor = HighlightInterceptor::new();
    assert!(interceptor.install(&mut engine, first));
    let installed = engine.highlight_routine();
    assert!(!interceptor.install(&mut engine, second));
    assert!(Rc::ptr_eq(&engine.highlight_routine(), &installed));

    engine.highlight(LintReport::clean(ViewId::from_raw(1)));
    assert_eq!(calls.get(), 1);
    assert_eq!(second_calls.get(), 0);
}

#[test]
fn test_foreign_wrapper_on_top_is_left_in_place() {
    let mut engine = LintEngine::new();
    let (listener, calls) = counting_listener();

    let mut interceptor = HighlightInterceptor::new();
    interceptor.install(&mut engine, listener);

    let ours = engine.highlight_routine();
    let inner = Rc::clone(&ours);
    let foreign: HighlightFn = Rc::new(move |state: &mut LintState, report: &LintReport| {
        inner(state, report);
    });
    engine.replace_highlight_routine(Rc::clone(&foreign));

    assert!(!interceptor.uninstall(&mut engine));
    assert!(Rc::ptr_eq(&engine.highlight_routine(), &foreign));

    assert!(interceptor.is_installed());

    // The foreign wrapper still chains through ours.
    engine.highlight(LintReport::clean(ViewId::from_raw(1)));
    assert_eq!(calls.get(), 1);

    // Installing again must not stack a second listener under the foreign wrapper.
    let (second_listener, second_calls) = counting_listener();
    assert!(!interceptor.install(&mut engine, second_listener));
    assert!(Rc::ptr_eq(&engine.highlight_routine(), &foreign));

    engine.highlight(LintReport::clean(ViewId::from_raw(1)));
    assert_eq!(calls.get(), 2);
    assert_eq!(second_calls.get(), 0);

    // Once the foreign wrapper is removed, uninstall restores the original.
    engine.replace_highlight_routine(ours);
    assert!(interceptor.uninstall(&mut engine));
    assert!(!interceptor.is_installed());
}

#[test]
fn test_repeated_cycles_do_not_stack() {
    let mut engine = LintEngine::new();
    let original = engine.highlight_routine();
    let (listener, calls) = counting_listener();
    let mut interceptor = HighlightInterceptor::new();

    for _ in 0..3 {
        assert!(interceptor.install(&mut engine, Rc::clone(&listener)));
        assert!(interceptor.uninstall(&mut engine));
    }
    assert!(Rc::ptr_eq(&engine.highlight_routine(), &original));

    interceptor.install(&mut engine, listener);
    engine.highlight(LintReport::clean(ViewId::from_raw(1)));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_uninstall_without_install() {
    let mut engine = LintEngine::new();
    let original = engine.highlight_routine();

    assert!(!HighlightInterceptor::new().uninstall(&mut engine));
    assert!(Rc::ptr_eq(&engine.highlight_routine(), &original));
}
