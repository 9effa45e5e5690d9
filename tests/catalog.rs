use uvlink::{
    load_catalog, BundledSource, DefinitionDocument, FieldDef, MessageCatalog, MessageDef,
    SchemaError, WireVersion,
};

async fn default_catalog() -> std::sync::Arc<MessageCatalog> {
    load_catalog(
        &BundledSource,
        &["common", "ardupilotmega"],
        WireVersion::V1_0,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn published_seeds_are_reproduced() {
    let catalog = default_catalog().await;

    // Seeds depend on the layout-ordered field list; these four pin
    // the whole chain (token normalization, ordering, signature,
    // CRC fold) against the values the wider ecosystem ships.
    assert_eq!(catalog.message_by_name("HEARTBEAT").unwrap().crc_seed(), 50);
    assert_eq!(catalog.message_by_name("PARAM_VALUE").unwrap().crc_seed(), 220);
    assert_eq!(catalog.message_by_name("GPS_STATUS").unwrap().crc_seed(), 23);
    assert_eq!(catalog.message_by_name("ATTITUDE").unwrap().crc_seed(), 39);
}

#[tokio::test]
async fn layout_is_descending_width_with_stable_ties() {
    let catalog = default_catalog().await;

    for descriptor in catalog.messages() {
        let fields = descriptor.fields();
        for pair in fields.windows(2) {
            assert!(
                pair[0].type_size() >= pair[1].type_size(),
                "{}: {} before {}",
                descriptor.name(),
                pair[0].name(),
                pair[1].name()
            );
            if pair[0].type_size() == pair[1].type_size() {
                assert!(
                    pair[0].source_position() < pair[1].source_position(),
                    "{}: tie between {} and {} not in schema order",
                    descriptor.name(),
                    pair[0].name(),
                    pair[1].name()
                );
            }
        }
        let total: usize = fields.iter().map(|field| field.total_size()).sum();
        assert_eq!(descriptor.payload_length(), total);
    }
}

#[tokio::test]
async fn param_value_wire_layout() {
    let catalog = default_catalog().await;
    let descriptor = catalog.message_by_name("PARAM_VALUE").unwrap();
    let order: Vec<&str> = descriptor.fields().iter().map(|field| field.name()).collect();
    assert_eq!(
        order,
        ["param_value", "param_count", "param_index", "param_id", "param_type"]
    );
    assert_eq!(descriptor.payload_length(), 25);
}

#[tokio::test]
async fn heartbeat_version_alias_narrows_to_uint8() {
    let catalog = default_catalog().await;
    let descriptor = catalog.message_by_name("HEARTBEAT").unwrap();
    let version_field = descriptor
        .fields()
        .iter()
        .find(|field| field.name() == "mavlink_version")
        .unwrap();
    assert_eq!(version_field.type_size(), 1);
    assert!(!version_field.is_array());
    // custom_mode (4 bytes) must lead the layout.
    assert_eq!(descriptor.fields()[0].name(), "custom_mode");
}

#[tokio::test]
async fn ids_and_names_resolve_to_the_same_descriptor() {
    let catalog = default_catalog().await;
    for descriptor in catalog.messages() {
        let by_name = catalog.message_by_name(descriptor.name()).unwrap();
        assert!(std::sync::Arc::ptr_eq(descriptor, by_name));
    }
}

#[tokio::test]
async fn repeated_loads_are_deterministic() {
    let first = default_catalog().await;
    let second = default_catalog().await;
    assert_eq!(first.len(), second.len());
    for descriptor in first.messages() {
        let twin = second.message_by_id(descriptor.id()).unwrap();
        assert_eq!(descriptor.crc_seed(), twin.crc_seed());
        assert_eq!(descriptor.payload_length(), twin.payload_length());
    }
}

#[tokio::test]
async fn enums_are_retained_for_introspection() {
    let catalog = default_catalog().await;
    assert!(catalog
        .enums()
        .iter()
        .any(|definition| definition.name == "MAV_STATE"));
}

#[test]
fn conflicting_documents_are_rejected() {
    let mut clashing = DefinitionDocument::default();
    clashing.messages.push(MessageDef {
        id: 30,
        name: "NOT_ATTITUDE".to_owned(),
        fields: vec![FieldDef::new("uint8_t", "x")],
    });

    let result =
        MessageCatalog::from_documents(&[uvlink::schema::dialects::common(), clashing]);
    assert!(matches!(result, Err(SchemaError::DuplicateId { id: 30, .. })));
}
