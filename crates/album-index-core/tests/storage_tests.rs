use album_index_core::storage::{CollectionStore, Database, ItemStatus, ItemTally, NewItem};

fn new_item(album: &str, name: &str, status: Option<ItemStatus>) -> NewItem {
    NewItem {
        album_key: album.to_string(),
        name: name.to_string(),
        country: "France".to_string(),
        year: "1849".to_string(),
        status,
        valuation: Some(4.5),
        ..NewItem::default()
    }
}

#[test]
fn test_add_and_list_by_album() {
    let db = Database::open_in_memory().unwrap();

    let first = db
        .add(new_item("Europe/France", "Cérès 20c", Some(ItemStatus::Used)))
        .unwrap();
    db.add(new_item("Europe/France", "Cérès 40c", Some(ItemStatus::Mint)))
        .unwrap();
    db.add(new_item("Asie/Japon", "Koban", None)).unwrap();

    assert!(first.id > 0);
    assert_eq!(first.status, Some(ItemStatus::Used));
    assert_eq!(first.valuation, Some(4.5));
    assert!(!first.created_at.is_empty());

    // Album keys are normalized on both sides.
    let france = db.list("/Europe\\France/").unwrap();
    let names: Vec<&str> = france.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Cérès 20c", "Cérès 40c"]);

    assert_eq!(db.list("Asie/Japon").unwrap().len(), 1);
    assert!(db.list("Afrique").unwrap().is_empty());
    assert_eq!(
        db.album_keys().unwrap(),
        vec![("Asie/Japon".to_string(), 1), ("Europe/France".to_string(), 2)]
    );
}

#[test]
fn test_remove_item() {
    let db = Database::open_in_memory().unwrap();
    let item = db.add(new_item("Europe/France", "Cérès", None)).unwrap();

    assert!(db.remove(item.id).unwrap());
    assert!(!db.remove(item.id).unwrap());
    assert!(db.get_item(item.id).unwrap().is_none());
    assert!(db.list("Europe/France").unwrap().is_empty());
}

#[test]
fn test_blank_name_is_rejected() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.add(new_item("Europe/France", "   ", None)).is_err());
}

#[test]
fn test_store_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("items.db");
    {
        let db = Database::open(&path).unwrap();
        db.add(new_item("Europe/France", "Cérès", Some(ItemStatus::Variety)))
            .unwrap();
    }
    let db = Database::open(&path).unwrap();
    let items = db.list("Europe/France").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].status, Some(ItemStatus::Variety));
}

#[test]
fn test_item_tally() {
    let db = Database::open_in_memory().unwrap();
    db.add(new_item("A", "one", Some(ItemStatus::Used))).unwrap();
    db.add(new_item("A", "two", Some(ItemStatus::Used))).unwrap();
    db.add(new_item("A", "three", Some(ItemStatus::SelfAdhesive)))
        .unwrap();
    db.add(NewItem {
        damaged: true,
        ..new_item("A", "four", None)
    })
    .unwrap();

    let tally = ItemTally::from_items(&db.list("A").unwrap());
    assert_eq!(tally.total, 4);
    assert_eq!(tally.used, 2);
    assert_eq!(tally.self_adhesive, 1);
    assert_eq!(tally.mint, 0);
    assert_eq!(tally.damaged, 1);
}
