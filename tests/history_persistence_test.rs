// ==========================================
// 历史记录持久化集成测试
// ==========================================
// 覆盖: 跨实例持久化、容量淘汰、删除、清空、损坏数据恢复
// ==========================================


use print_cost_calc::app::AppState;
use print_cost_calc::repository::{HistoryStore, SlotStore, SqliteSlotStore};
use print_cost_calc::Confirmation;
use std::sync::{Arc, Mutex};
use test_helpers::{create_test_db, form_with_weight, reference_form};

#[test]
fn test_history_survives_restart() {
    let (_tmp, db_path) = create_test_db().unwrap();

    {
        let mut state = AppState::new(db_path.clone()).unwrap();
        state.calculator_api.calculate(&form_with_weight(10)).unwrap();
        state.calculator_api.save_current().unwrap();
        state.calculator_api.calculate(&form_with_weight(30)).unwrap();
        state.calculator_api.save_current().unwrap();
    }

    let state = AppState::new(db_path).unwrap();
    let history = state.calculator_api.list_history();
    assert_eq!(history.len(), 2);
    // 最新在前
    assert_eq!(history[0].input.filament_weight_g, 30.0);
    assert_eq!(history[1].input.filament_weight_g, 10.0);
    assert!(history[0].timestamp >= history[1].timestamp);
}

#[test]
fn test_capacity_evicts_oldest() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let mut state = AppState::new(db_path.clone()).unwrap();

    for weight in 1..=25 {
        state.calculator_api.calculate(&form_with_weight(weight)).unwrap();
        state.calculator_api.save_current().unwrap();
    }

    let reopened = AppState::new(db_path).unwrap();
    let history = reopened.calculator_api.list_history();
    assert_eq!(history.len(), 20);
    assert_eq!(history[0].input.filament_weight_g, 25.0);
    assert_eq!(history[19].input.filament_weight_g, 6.0);
}

#[test]
fn test_delete_item_persists() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let mut state = AppState::new(db_path.clone()).unwrap();

    for weight in [10, 20, 30] {
        state.calculator_api.calculate(&form_with_weight(weight)).unwrap();
        state.calculator_api.save_current().unwrap();
    }

    assert!(state.calculator_api.delete_history_item(1).unwrap());
    assert!(!state.calculator_api.delete_history_item(99).unwrap());

    let reopened = AppState::new(db_path).unwrap();
    let weights: Vec<f64> = reopened
        .calculator_api
        .list_history()
        .iter()
        .map(|r| r.input.filament_weight_g)
        .collect();
    assert_eq!(weights, vec![30.0, 10.0]);
}

#[test]
fn test_clear_history_with_confirmation() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let mut state = AppState::new(db_path.clone()).unwrap();

    state.calculator_api.calculate(&reference_form()).unwrap();
    state.calculator_api.save_current().unwrap();

    assert!(!state.calculator_api.clear_history(Confirmation::Declined).unwrap());
    assert_eq!(state.calculator_api.list_history().len(), 1);

    assert!(state.calculator_api.clear_history(Confirmation::Confirmed).unwrap());

    let reopened = AppState::new(db_path).unwrap();
    assert!(reopened.calculator_api.list_history().is_empty());
}

#[test]
fn test_corrupt_slot_reads_as_empty_and_is_overwritten() {
    let (_tmp, db_path) = create_test_db().unwrap();

    let conn = print_cost_calc::db::open_sqlite_connection(&db_path).unwrap();
    let slot = SqliteSlotStore::new(Arc::new(Mutex::new(conn)));
    slot.write("print3d_history", "{not json").unwrap();

    let mut state = AppState::new(db_path).unwrap();
    assert!(state.history_repo.list().is_empty());

    state.calculator_api.calculate(&reference_form()).unwrap();
    state.calculator_api.save_current().unwrap();
    assert_eq!(state.history_repo.list().len(), 1);
}

#[test]
fn test_overflowing_calculation_keeps_saved_history() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let mut state = AppState::new(db_path.clone()).unwrap();

    for weight in 1..=5 {
        state.calculator_api.calculate(&form_with_weight(weight)).unwrap();
        state.calculator_api.save_current().unwrap();
    }

    let mut huge = reference_form();
    huge.filament_weight = "1e300".into();
    huge.filament_cost = "1e300".into();
    let calc = state.calculator_api.calculate(&huge).unwrap();
    assert!(calc.breakdown.final_price.is_infinite());

    let err = state.calculator_api.save_current().unwrap_err();
    assert!(matches!(err, print_cost_calc::ApiError::PersistenceWrite(_)));

    let reopened = AppState::new(db_path).unwrap();
    let weights: Vec<f64> = reopened
        .calculator_api
        .list_history()
        .iter()
        .map(|r| r.input.filament_weight_g)
        .collect();
    assert_eq!(weights, vec![5.0, 4.0, 3.0, 2.0, 1.0]);
}
