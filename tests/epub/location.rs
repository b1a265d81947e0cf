use crate::epub::util::TestEpub;
use folio::ebook::errors::LocationError;
use folio::ebook::location::Location;
use folio::paginator::LayoutConfig;
use std::cmp::Ordering;
use wasm_bindgen_test::wasm_bindgen_test;

#[test]
#[wasm_bindgen_test]
fn test_compare_by_rank() {
    let epub = TestEpub::File.open();
    let model = epub.content().locations();

    let end_of_c1 = Location::new("c1", 124);
    let map = Location::new("map", 0);
    assert_eq!(Ordering::Less, model.compare(&end_of_c1, &map).unwrap());
    // `c2` sorts before `map` as a string, but follows it in the reading order
    assert_eq!(
        Ordering::Greater,
        model.compare(&Location::new("c2", 0), &map).unwrap()
    );
    assert_eq!(
        Err(LocationError::UnknownResource("nav".to_owned())),
        model.compare(&Location::new("nav", 0), &map)
    );
}

#[test]
#[wasm_bindgen_test]
fn test_bounds() {
    let epub = TestEpub::File.open();
    let model = epub.content().locations();

    assert_eq!(Some(Location::new("cover", 0)), model.start());
    assert_eq!(Some(Location::new("c2", 41)), model.end());
    assert_eq!(178, model.total_extent());
    assert_eq!(1, model.rank("c1").unwrap());
    assert_eq!(1, model.extent("map").unwrap());
}

#[test]
#[wasm_bindgen_test]
fn test_normalize_and_validate() {
    let epub = TestEpub::File.open();
    let model = epub.content().locations();

    assert_eq!(
        Location::new("map", 1),
        model.normalize(&Location::new("map", 40)).unwrap()
    );
    assert_eq!(
        Err(LocationError::OffsetOutOfRange {
            resource: "map".to_owned(),
            offset: 40,
            extent: 1,
        }),
        model.validate(&Location::new("map", 40))
    );
    // Resources outside the reading order are not addressable
    assert!(model.normalize(&Location::new("style", 0)).is_err());
}

#[test]
#[wasm_bindgen_test]
fn test_progression() {
    let epub = TestEpub::File.open();
    let model = epub.content().locations();

    assert_eq!(0.0, model.progression(&Location::new("cover", 0)).unwrap());
    assert_eq!(12.0 / 178.0, model.progression(&Location::new("c1", 0)).unwrap());
    assert_eq!(1.0, model.progression(&Location::new("c2", 41)).unwrap());
    // Offsets beyond the extent are rejected rather than clamped
    assert_eq!(
        Err(LocationError::OffsetOutOfRange {
            resource: "c1".to_owned(),
            offset: 99999,
            extent: 124,
        }),
        model.progression(&Location::new("c1", 99999))
    );
}

#[test]
#[wasm_bindgen_test]
fn test_screen_rejects_out_of_range() {
    let epub = TestEpub::File.open();
    let model = epub.content().locations();
    let paginator = epub
        .paginator_with(LayoutConfig::builder().width(100.0).build().unwrap())
        .unwrap();
    let screen = &paginator.screens()[1];

    assert!(screen.contains(&Location::new("c1", 124), model).unwrap());
    assert!(matches!(
        screen.contains(&Location::new("c1", 99999), model),
        Err(LocationError::OffsetOutOfRange { .. })
    ));
}

#[test]
#[wasm_bindgen_test]
fn test_display() {
    assert_eq!("c1@57", Location::new("c1", 57).to_string());
}
