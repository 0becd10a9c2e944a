use funnelbook_model::{
    parse_recorded_at, ClientId, Collection, OperatorId, OpportunityNumber, Product, Stage,
    Status, OPERATOR_MAX_LEN, OPPORTUNITY_NUMBER_FLOOR,
};

#[test]
fn operator_id_accepts_any_non_empty_text() {
    assert_eq!(OperatorId::parse("com-042").expect("operator").as_str(), "com-042");
    assert_eq!(OperatorId::parse("  maría  ").expect("operator").as_str(), "maría");
    assert!(OperatorId::parse("").is_err());
    assert!(OperatorId::parse("   ").is_err());
    let too_long = "x".repeat(OPERATOR_MAX_LEN + 1);
    assert!(OperatorId::parse(&too_long).is_err());
}

#[test]
fn client_id_must_be_positive_integer() {
    assert_eq!(ClientId::parse("42").expect("client").as_u64(), 42);
    assert!(ClientId::parse("0").is_err());
    assert!(ClientId::parse("-1").is_err());
    assert!(ClientId::parse("abc").is_err());
    assert_eq!(ClientId::from_cell("42.0").expect("float cell").as_u64(), 42);
    assert!(ClientId::from_cell("42.5").is_none());
}

#[test]
fn opportunity_number_floor_and_successor() {
    assert_eq!(OpportunityNumber::floor().as_u64(), OPPORTUNITY_NUMBER_FLOOR);
    assert_eq!(OpportunityNumber::after(100_007).as_u64(), 100_008);
    // A corrupted maximum below the floor never pulls the counter down.
    assert_eq!(OpportunityNumber::after(5).as_u64(), OPPORTUNITY_NUMBER_FLOOR);
    assert_eq!(OpportunityNumber::after(u64::MAX).as_u64(), u64::MAX);
}

#[test]
fn opportunity_number_cell_reading_is_lenient() {
    assert_eq!(OpportunityNumber::from_cell("100007").map(|n| n.as_u64()), Some(100_007));
    assert_eq!(OpportunityNumber::from_cell("100007.0").map(|n| n.as_u64()), Some(100_007));
    assert!(OpportunityNumber::from_cell("bad").is_none());
    assert!(OpportunityNumber::from_cell("").is_none());
}

#[test]
fn catalogs_round_trip_their_wire_labels() {
    for product in Product::ALL {
        assert_eq!(Product::parse(product.as_str()).expect("product"), product);
    }
    for stage in Stage::ALL {
        assert_eq!(Stage::parse(stage.as_str()).expect("stage"), stage);
    }
    for status in Status::ALL {
        assert_eq!(Status::parse(status.as_str()).expect("status"), status);
    }
    assert!(Product::parse("Hipoteca").is_err());
    assert!(Status::parse("").is_err());
}

#[test]
fn catalog_serde_uses_wire_labels() {
    let json = serde_json::to_string(&Status::CerradaGanada).expect("serialize");
    assert_eq!(json, "\"Cerrada Ganada\"");
    let back: Status = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, Status::CerradaGanada);
}

#[test]
fn collections_expose_canonical_schemas() {
    assert_eq!(Collection::parse("funnel").expect("funnel"), Collection::Funnel);
    assert_eq!(Collection::parse("plan_cuenta").expect("plan"), Collection::PlanCuenta);
    assert_eq!(Collection::parse("bitacora").expect("visits"), Collection::Bitacora);
    assert!(Collection::parse("ventas").is_err());

    assert_eq!(Collection::Funnel.columns()[2], "no_oportunidad");
    assert!(Collection::PlanCuenta.columns().contains(&"analisis_fin_pos"));
    assert!(Collection::Bitacora.columns().contains(&"proximo_objetivo"));
    for collection in Collection::ALL {
        assert!(collection.columns().contains(&"comercial_id"));
        assert!(collection.columns().contains(&"fecha_gestion"));
    }
}

#[test]
fn recorded_at_parsing_accepts_both_observed_forms() {
    let canonical = parse_recorded_at("2026-08-27T10:15:00.000001Z").expect("rfc3339");
    let legacy = parse_recorded_at("2026-08-27 10:15:00.000001").expect("legacy");
    assert_eq!(canonical, legacy);
    assert!(parse_recorded_at("yesterday").is_none());
    assert!(parse_recorded_at("").is_none());
}
