use wrap_core::{
    MENU_TITLE, Selection, TextBuffer, WrapCommandRegistry, default_wrapper_tags, menu_entries,
};

fn main() {
    let wrappers = default_wrapper_tags();
    let registry = WrapCommandRegistry::from_wrapper_tags(&wrappers);

    for command in registry.commands() {
        println!("{:<32} {}", command.id, command.name);
    }

    let mut doc = TextBuffer::new("hello world");

    // Toggle bold on "world".
    let edit = registry
        .execute("wrap-with-shortcut-bold", &mut doc, Selection::new(6, 11))
        .unwrap()
        .unwrap();
    assert_eq!(doc.text(), "hello <b>world</b>");

    // Re-select the inner text and toggle again.
    registry
        .execute("wrap-with-shortcut-bold", &mut doc, Selection::from(edit.inner))
        .unwrap();
    assert_eq!(doc.text(), "hello world");

    // The context menu applies a pair directly.
    println!("{MENU_TITLE}:");
    for entry in menu_entries(&wrappers) {
        println!("  {}", entry.title);
    }
    let underline = &menu_entries(&wrappers)[0];
    registry.wrap_with(&mut doc, Selection::new(0, 5), &underline.tags);
    assert_eq!(doc.text(), "<u>hello</u> world");
}
