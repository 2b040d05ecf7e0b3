use wrap_core::{
    CommandError, CommandHost, MENU_TITLE, Selection, TagPair, TextBuffer, ToggleKind,
    WrapCommand, WrapCommandRegistry, WrapperTag, default_wrapper_tags, menu_entries,
    register_commands,
};

#[derive(Default)]
struct RecordingHost {
    registered: Vec<WrapCommand>,
}

impl CommandHost for RecordingHost {
    fn register(&mut self, command: WrapCommand) {
        self.registered.push(command);
    }
}

#[test]
fn test_default_commands_ids_and_titles() {
    let registry = WrapCommandRegistry::from_wrapper_tags(&default_wrapper_tags());

    let listed: Vec<(&str, &str)> = registry
        .commands()
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("wrap-with-shortcut-underline", "Toggle Underline"),
            ("wrap-with-shortcut-bold", "Toggle Bold"),
            ("wrap-with-shortcut-italic", "Toggle Italic"),
        ]
    );
}

#[test]
fn test_register_commands_uses_host_in_order() {
    let wrappers = vec![
        WrapperTag::new("0", "Mark", "==", "=="),
        WrapperTag::new("1", "Code", "`", "`"),
    ];
    let mut host = RecordingHost::default();
    register_commands(&wrappers, &mut host);

    assert_eq!(host.registered.len(), 2);
    assert_eq!(host.registered[0].id, "wrap-with-shortcut-0");
    assert_eq!(host.registered[1].name, "Toggle Code");
    assert_eq!(host.registered[1].tags, TagPair::symmetric("`"));
}

#[test]
fn test_execute_toggles_twice() {
    let registry = WrapCommandRegistry::from_wrapper_tags(&default_wrapper_tags());
    let mut doc = TextBuffer::new("some text");

    let edit = registry
        .execute("wrap-with-shortcut-italic", &mut doc, Selection::new(5, 9))
        .unwrap()
        .unwrap();
    assert_eq!(doc.text(), "some <i>text</i>");

    let edit = registry
        .execute(
            "wrap-with-shortcut-italic",
            &mut doc,
            Selection::from(edit.inner),
        )
        .unwrap()
        .unwrap();
    assert_eq!(edit.kind, ToggleKind::Unwrap);
    assert_eq!(doc.text(), "some text");
}

#[test]
fn test_execute_unknown_command() {
    let registry = WrapCommandRegistry::from_wrapper_tags(&default_wrapper_tags());
    let mut doc = TextBuffer::new("x");

    let result = registry.execute("wrap-with-shortcut-strike", &mut doc, Selection::new(0, 1));
    assert_eq!(
        result,
        Err(CommandError::UnknownCommand(
            "wrap-with-shortcut-strike".to_string()
        ))
    );
    assert_eq!(doc.text(), "x");
}

#[test]
fn test_command_with_empty_markers_is_noop() {
    let registry = WrapCommandRegistry::from_wrapper_tags(&[WrapperTag::new("blank", "Blank", "", "")]);
    let mut doc = TextBuffer::new("keep");

    let result = registry.execute("wrap-with-shortcut-blank", &mut doc, Selection::new(0, 4));
    assert_eq!(result, Ok(None));
    assert_eq!(doc.text(), "keep");
}

#[test]
fn test_wrap_with_explicit_pair() {
    let registry = WrapCommandRegistry::new();
    let mut doc = TextBuffer::new("plain");

    let edit = registry
        .wrap_with(&mut doc, Selection::new(0, 5), &TagPair::new("<mark>", "</mark>"))
        .unwrap();
    assert_eq!(edit.kind, ToggleKind::Wrap);
    assert_eq!(doc.text(), "<mark>plain</mark>");
}

#[test]
fn test_menu_entries() {
    let entries = menu_entries(&default_wrapper_tags());
    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();

    assert_eq!(MENU_TITLE, "Select wrapper");
    assert_eq!(
        titles,
        vec!["Wrap with Underline", "Wrap with Bold", "Wrap with Italic"]
    );
    assert_eq!(entries[1].tags, TagPair::new("<b>", "</b>"));
}
