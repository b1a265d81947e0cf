use crate::epub::util::TestEpub;
use folio::ebook::location::Location;
use folio::paginator::{LayoutConfig, PaginatorError, RenditionLayout, SpreadMode};
use wasm_bindgen_test::wasm_bindgen_test;

fn width(width: f64) -> LayoutConfig {
    LayoutConfig::builder().width(width).build().unwrap()
}

#[test]
#[wasm_bindgen_test]
fn test_screens() {
    let epub = TestEpub::File.open();
    let paginator = epub.paginator_with(width(100.0)).unwrap();

    let bounds = paginator
        .screens()
        .iter()
        .map(|screen| (screen.begin().to_string(), screen.end().to_string()))
        .collect::<Vec<_>>();
    let expected = [
        ("cover@0", "c1@88"),
        ("c1@88", "c1@124"),
        // Images occupy a screen of their own
        ("map@0", "map@1"),
        ("c2@0", "c2@41"),
    ];
    assert_eq!(
        expected
            .iter()
            .map(|&(begin, end)| (begin.to_owned(), end.to_owned()))
            .collect::<Vec<_>>(),
        bounds
    );
    assert!(paginator.is_first_screen());
    assert_eq!(&Location::new("cover", 0), paginator.current_location());
}

#[test]
#[wasm_bindgen_test]
fn test_navigation_targets() {
    let epub = TestEpub::File.open();
    let mut paginator = epub.paginator_with(width(100.0)).unwrap();
    let pages = epub.navigation().page_list().unwrap();

    let indices = pages
        .children()
        .iter()
        .filter_map(|page| page.target())
        .map(|target| paginator.goto_location(target).unwrap().index())
        .collect::<Vec<_>>();
    assert_eq!(vec![1, 3], indices);
    assert_eq!(&Location::new("c2", 37), paginator.current_location());

    let section = &epub.navigation().contents().unwrap().children()[1].children()[0];
    let screen = paginator.goto_location(section.target().unwrap()).unwrap();
    assert_eq!(0, screen.index());
    assert!(
        screen
            .contains(&Location::new("c1", 57), epub.content().locations())
            .unwrap()
    );
}

#[test]
#[wasm_bindgen_test]
fn test_sequential_reading() {
    let epub = TestEpub::File.open();
    let mut paginator = epub.paginator_with(width(100.0)).unwrap();

    let mut visited = vec![paginator.current_screen().unwrap().index()];
    while !paginator.is_final_screen() {
        visited.push(paginator.next_screen().unwrap().index());
    }
    assert_eq!(vec![0, 1, 2, 3], visited);
    assert_eq!(&Location::new("c2", 0), paginator.current_location());
    assert!(matches!(
        paginator.next_screen(),
        Err(PaginatorError::AtBoundary { index: 3 })
    ));

    let screen = paginator.end_document().unwrap();
    assert_eq!(3, screen.index());
    assert_eq!(&Location::new("c2", 41), paginator.current_location());

    paginator.begin_document().unwrap();
    assert!(paginator.is_first_screen());
    assert!(matches!(
        paginator.previous_screen(),
        Err(PaginatorError::AtBoundary { index: 0 })
    ));
}

#[test]
#[wasm_bindgen_test]
fn test_relayout() {
    let epub = TestEpub::File.open();
    let mut paginator = epub.paginator_with(width(100.0)).unwrap();
    paginator.goto_location(&Location::new("c1", 57)).unwrap();

    paginator.set_layout(width(50.0)).unwrap();
    assert_eq!(5, paginator.screen_count());
    let screen = paginator.current_screen().unwrap();
    assert_eq!(1, screen.index());
    assert_eq!(&Location::new("c1", 38), screen.begin());
    // The location is retained across layouts
    assert_eq!(&Location::new("c1", 57), paginator.current_location());

    let invalid = LayoutConfig::builder().width(-1.0).build();
    assert!(invalid.is_err());
    assert_eq!(Some(50.0), paginator.layout().map(LayoutConfig::width));
}

#[test]
#[wasm_bindgen_test]
fn test_paginated_rendition() {
    let epub = TestEpub::File.open();
    let single = LayoutConfig::builder()
        .rendition(RenditionLayout::Paginated)
        .build()
        .unwrap();
    let paginator = epub.paginator_with(single).unwrap();
    assert_eq!(4, paginator.screen_count());
    assert_eq!(&Location::new("map", 0), paginator.screens()[2].begin());

    let spread = LayoutConfig::builder()
        .rendition(RenditionLayout::Paginated)
        .spread(SpreadMode::Both)
        .build()
        .unwrap();
    let paginator = epub.paginator_with(spread).unwrap();
    assert_eq!(2, paginator.screen_count());
    assert_eq!(&Location::new("c1", 124), paginator.screens()[0].end());
}

#[test]
#[wasm_bindgen_test]
fn test_history() {
    let epub = TestEpub::File.open();
    let mut paginator = epub.paginator_with(width(100.0)).unwrap();

    paginator.goto_location(&Location::new("c2", 37)).unwrap();
    paginator.goto_screen(2).unwrap();
    paginator.previous_screen().unwrap();
    assert_eq!(
        vec!["cover@0", "c2@37", "map@0"],
        paginator
            .history()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    );

    assert_eq!(2, paginator.back().unwrap().index());
    assert_eq!(3, paginator.back().unwrap().index());
    assert_eq!(&Location::new("c2", 37), paginator.current_location());
    assert_eq!(0, paginator.back().unwrap().index());
    assert!(matches!(paginator.back(), Err(PaginatorError::EmptyHistory)));
}

#[test]
#[wasm_bindgen_test]
fn test_unpaginated() {
    let epub = TestEpub::Dir.open();
    let mut paginator = epub.paginator();

    assert_eq!(0, paginator.screen_count());
    assert!(!paginator.is_first_screen());
    assert!(matches!(
        paginator.goto_location(&Location::new("c1", 0)),
        Err(PaginatorError::Unpaginated)
    ));

    paginator.set_layout(LayoutConfig::from_metadata(epub.metadata())).unwrap();
    assert_eq!(
        Some(SpreadMode::Landscape),
        paginator.layout().map(LayoutConfig::spread)
    );
    // The default width fits every chapter apart from the image
    assert_eq!(3, paginator.screen_count());
}
