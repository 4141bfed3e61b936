use std::collections::HashSet;

use product_store::{
    InvalidInput, NewProduct, Product, ProductPatch, ProductStore, StoreError,
};

fn invalid(input: InvalidInput) -> StoreError {
    StoreError::InvalidInput(input)
}

#[test]
fn test_create_assigns_unique_ids() {
    let store = ProductStore::default();
    let mut ids = HashSet::new();

    for i in 0..500 {
        let product = store
            .create(NewProduct::new(format!("product-{}", i), i as f64))
            .unwrap();
        assert!(ids.insert(product.id.clone()), "重复的 ID: {}", product.id);
    }

    assert_eq!(store.len(), 500);
}

#[test]
fn test_create_trims_name_and_applies_defaults() {
    let store = ProductStore::default();
    let product = store.create(NewProduct::new("  Keyboard  ", 0.0)).unwrap();

    assert_eq!(product.name, "Keyboard");
    assert_eq!(product.price, 0.0);
    assert_eq!(product.category, "general");
    assert_eq!(product.description, "");
    assert_eq!(product.stock, 0);
}

#[test]
fn test_create_empty_category_falls_back_to_default() {
    let store = ProductStore::default();
    let product = store
        .create(NewProduct::new("Mouse", 15.5).category("").stock(3))
        .unwrap();

    assert_eq!(product.category, "general");
    assert_eq!(product.stock, 3);
}

#[test]
fn test_create_rejects_blank_name() {
    let store = ProductStore::default();

    for name in ["", "   ", "\t\n"] {
        assert_eq!(store.create(NewProduct::new(name, 10.0)), Err(invalid(InvalidInput::Name)));
        assert_eq!(store.create(NewProduct::new(name, -10.0)), Err(invalid(InvalidInput::Name)));
    }
    assert!(store.is_empty());
}

#[test]
fn test_create_rejects_negative_price() {
    let store = ProductStore::default();
    assert_eq!(
        store.create(NewProduct::new("A", -0.01)),
        Err(invalid(InvalidInput::Price))
    );
    assert!(store.is_empty());
}

#[test]
fn test_get_by_id_returns_created_product() {
    let store = ProductStore::default();
    let created = store
        .create(
            NewProduct::new("Monitor", 300.0)
                .category("Displays")
                .description("27 inch")
                .stock(4),
        )
        .unwrap();

    assert_eq!(store.get_by_id(created.id.as_str()), Ok(created));
}

#[test]
fn test_get_by_id_unknown() {
    let store = ProductStore::default();
    let err = store.get_by_id("missing").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref id) if id.as_str() == "missing"));
}

#[test]
fn test_list_preserves_insertion_order() {
    let store = ProductStore::default();
    for name in ["first", "second", "third"] {
        store.create(NewProduct::new(name, 1.0)).unwrap();
    }
    let second = store.list()[1].id.clone();
    store.delete(second.as_str()).unwrap();
    store.create(NewProduct::new("fourth", 1.0)).unwrap();

    let names: Vec<_> = store.list().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["first", "third", "fourth"]);
}

#[test]
fn test_update_changes_only_supplied_fields() {
    let store = ProductStore::default();
    let created = store
        .create(NewProduct::new("Lamp", 40.0).description("Desk lamp").stock(2))
        .unwrap();

    let updated = store
        .update(created.id.as_str(), ProductPatch::default().price(35.0).stock(7))
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Lamp");
    assert_eq!(updated.description, "Desk lamp");
    assert_eq!(updated.category, "general");
    assert_eq!(updated.price, 35.0);
    assert_eq!(updated.stock, 7);
    assert_eq!(store.get_by_id(created.id.as_str()), Ok(updated));
}

#[test]
fn test_update_trims_name() {
    let store = ProductStore::default();
    let created = store.create(NewProduct::new("Lamp", 40.0)).unwrap();
    let updated = store
        .update(created.id.as_str(), ProductPatch::default().name("  Floor lamp "))
        .unwrap();
    assert_eq!(updated.name, "Floor lamp");
}

#[test]
fn test_update_empty_patch_rejected() {
    let store = ProductStore::default();
    let created = store.create(NewProduct::new("Lamp", 40.0)).unwrap();

    assert_eq!(
        store.update(created.id.as_str(), ProductPatch::default()),
        Err(invalid(InvalidInput::NoFields))
    );
    assert_eq!(store.get_by_id(created.id.as_str()), Ok(created));
}

#[test]
fn test_update_unknown_id_is_not_found_regardless_of_patch() {
    let store = ProductStore::default();
    let patches = [
        ProductPatch::default(),
        ProductPatch::default().price(-5.0),
        ProductPatch::default().name(" "),
        ProductPatch::default().stock(1),
    ];

    for patch in patches {
        assert!(matches!(
            store.update("missing", patch),
            Err(StoreError::NotFound(_))
        ));
    }
}

#[test]
fn test_update_invalid_fields_leave_product_unchanged() {
    let store = ProductStore::default();
    let created = store.create(NewProduct::new("Lamp", 40.0)).unwrap();
    let id = created.id.as_str();

    assert_eq!(
        store.update(id, ProductPatch::default().price(-5.0)),
        Err(invalid(InvalidInput::Price))
    );
    assert_eq!(
        store.update(id, ProductPatch::default().name("   ").stock(99)),
        Err(invalid(InvalidInput::Name))
    );
    assert_eq!(
        store.update(id, ProductPatch::default().category("Lights").price(-1.0)),
        Err(invalid(InvalidInput::Price))
    );
    assert_eq!(store.get_by_id(id), Ok(created));
}

#[test]
fn test_delete_twice() {
    let store = ProductStore::default();
    let created = store.create(NewProduct::new("Lamp", 40.0)).unwrap();
    store.create(NewProduct::new("Desk", 140.0)).unwrap();

    assert_eq!(store.delete(created.id.as_str()), Ok(created.clone()));
    assert_eq!(store.len(), 1);
    assert!(matches!(
        store.delete(created.id.as_str()),
        Err(StoreError::NotFound(_))
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_list_length_tracks_creates_and_deletes() {
    let store = ProductStore::default();
    let mut created = Vec::new();
    for i in 0..10 {
        created.push(store.create(NewProduct::new(format!("p{}", i), 1.0)).unwrap());
    }
    // 失败的操作不影响数量
    assert!(store.create(NewProduct::new("", 1.0)).is_err());
    assert!(store.delete("missing").is_err());

    for product in created.iter().take(4) {
        store.delete(product.id.as_str()).unwrap();
    }

    assert_eq!(store.list().len(), 6);
}

#[test]
fn test_with_products_rejects_duplicate_ids() {
    let products = vec![Product::new("1", "A", 10.0), Product::new("1", "B", 20.0)];
    assert!(matches!(
        ProductStore::with_products(products, 6),
        Err(StoreError::InvalidInput(InvalidInput::DuplicateId))
    ));
}

#[test]
fn test_with_products_validates_fields() {
    let blank_name = vec![Product::new("x", "   ", 5.0)];
    assert!(matches!(
        ProductStore::with_products(blank_name, 6),
        Err(StoreError::InvalidInput(InvalidInput::Name))
    ));

    let negative_price = vec![Product::new("x", "A", 1.0), Product::new("y", "B", -5.0)];
    assert!(matches!(
        ProductStore::with_products(negative_price, 6),
        Err(StoreError::InvalidInput(InvalidInput::Price))
    ));

    let nan_price = vec![Product::new("x", "A", f64::NAN)];
    assert!(matches!(
        ProductStore::with_products(nan_price, 6),
        Err(StoreError::InvalidInput(InvalidInput::Price))
    ));
}

#[test]
fn test_with_products_trims_names() {
    let store = ProductStore::with_products(vec![Product::new("1", "  A  ", 10.0)], 6).unwrap();
    assert_eq!(store.get_by_id("1").unwrap().name, "A");
}

#[test]
fn test_end_to_end_scenario() {
    let store = ProductStore::with_products(vec![Product::new("1", "A", 10.0)], 6).unwrap();

    let b = store.create(NewProduct::new("B", 20.0)).unwrap();
    assert_ne!(b.id.as_str(), "1");
    assert_eq!(store.list().len(), 2);

    let updated = store.update("1", ProductPatch::default().price(15.0)).unwrap();
    assert_eq!(updated.price, 15.0);
    assert_eq!(updated.name, "A");

    store.delete("1").unwrap();
    assert!(matches!(store.get_by_id("1"), Err(StoreError::NotFound(_))));
    assert_eq!(store.list(), vec![b]);
}

#[test]
fn test_concurrent_creates_keep_ids_unique() {
    let store = ProductStore::new(4);
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    store
                        .create(NewProduct::new(format!("t{}-{}", t, i), 1.0))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let ids: HashSet<_> = store.list().into_iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 400);
}
