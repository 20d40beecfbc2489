mod common;

use common::{tick, Backend};
use std::collections::HashSet;
use taskstore_core::{RepoError, TaskDraft};

fn create_then_get_returns_the_stored_record(backend: Backend) {
    let repo = backend.repo;

    let created = repo.create_task(&TaskDraft::new("buy milk", "2%")).unwrap();
    assert!(!created.id.is_empty());
    assert!(!created.completed);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.title, "buy milk");
    assert_eq!(created.body, "2%");

    let fetched = repo.get_task(&created.id).unwrap();
    assert_eq!(fetched, created);
}

fn update_keeps_created_at_and_refreshes_updated_at(backend: Backend) {
    let repo = backend.repo;
    let created = repo.create_task(&TaskDraft::new("buy milk", "2%")).unwrap();

    tick();
    let updated = repo
        .update_task(&created.id, &TaskDraft::new("buy milk", "whole"))
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.body, "whole");
    assert_eq!(repo.get_task(&created.id).unwrap(), updated);
}

fn update_ignores_a_forged_created_at(backend: Backend) {
    let repo = backend.repo;
    let created = repo.create_task(&TaskDraft::new("report", "draft")).unwrap();

    let mut forged = created.clone();
    forged.created_at = 1;
    forged.body = "final".to_string();
    let updated = repo
        .update_task(&created.id, &TaskDraft::from(&forged))
        .unwrap();

    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.body, "final");
}

fn updated_at_is_non_decreasing_across_updates(backend: Backend) {
    let repo = backend.repo;
    let created = repo.create_task(&TaskDraft::new("counter", "0")).unwrap();

    let mut previous = created.updated_at;
    for round in 1..=5 {
        let updated = repo
            .update_task(&created.id, &TaskDraft::new("counter", round.to_string()))
            .unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= previous);
        assert!(updated.updated_at >= updated.created_at);
        previous = updated.updated_at;
    }

    assert_eq!(repo.get_task(&created.id).unwrap().body, "5");
}

fn completion_flag_round_trips(backend: Backend) {
    let repo = backend.repo;
    let created = repo
        .create_task(&TaskDraft::new("ship", "v1").with_completed(true))
        .unwrap();
    assert!(repo.get_task(&created.id).unwrap().completed);

    repo.update_task(&created.id, &TaskDraft::new("ship", "v1"))
        .unwrap();
    assert!(!repo.get_task(&created.id).unwrap().completed);
}

fn delete_removes_the_task_permanently(backend: Backend) {
    let repo = backend.repo;
    let created = repo.create_task(&TaskDraft::new("temp", "")).unwrap();

    repo.delete_task(&created.id).unwrap();

    let get_err = repo.get_task(&created.id).unwrap_err();
    assert!(matches!(get_err, RepoError::NotFound(ref id) if *id == created.id));
    let second_delete = repo.delete_task(&created.id).unwrap_err();
    assert!(matches!(second_delete, RepoError::NotFound(_)));
    assert!(repo.get_all_tasks().unwrap().is_empty());
}

fn unknown_identifiers_are_not_found(backend: Backend) {
    let repo = backend.repo;
    repo.create_task(&TaskDraft::new("present", "")).unwrap();

    for id in ["999", "abc", "", "01"] {
        assert!(matches!(repo.get_task(id), Err(RepoError::NotFound(_))));
        assert!(matches!(
            repo.update_task(id, &TaskDraft::new("x", "y")),
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(repo.delete_task(id), Err(RepoError::NotFound(_))));
    }
    assert_eq!(repo.get_all_tasks().unwrap().len(), 1);
}

fn get_all_on_empty_store_is_empty(backend: Backend) {
    assert!(backend.repo.get_all_tasks().unwrap().is_empty());
}

fn get_all_returns_every_stored_task(backend: Backend) {
    let repo = backend.repo;
    let mut expected = HashSet::new();
    for index in 0..4 {
        let task = repo
            .create_task(&TaskDraft::new(format!("task {index}"), ""))
            .unwrap();
        expected.insert(task.id);
    }
    let dropped = repo.create_task(&TaskDraft::new("dropped", "")).unwrap();
    repo.delete_task(&dropped.id).unwrap();

    let listed: HashSet<_> = repo
        .get_all_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(listed, expected);
}

fn identifiers_are_never_reused(backend: Backend) {
    let repo = backend.repo;
    let first = repo.create_task(&TaskDraft::new("a", "")).unwrap();
    let second = repo.create_task(&TaskDraft::new("b", "")).unwrap();
    repo.delete_task(&second.id).unwrap();
    repo.delete_task(&first.id).unwrap();

    let third = repo.create_task(&TaskDraft::new("c", "")).unwrap();
    assert_ne!(third.id, first.id);
    assert_ne!(third.id, second.id);
}

fn returned_tasks_are_detached_copies(backend: Backend) {
    let repo = backend.repo;
    let created = repo.create_task(&TaskDraft::new("original", "")).unwrap();

    let mut copy = repo.get_task(&created.id).unwrap();
    copy.title = "mutated locally".to_string();
    copy.completed = true;

    assert_eq!(repo.get_task(&created.id).unwrap(), created);
}

macro_rules! repository_contract {
    ($backend:ident, $factory:expr) => {
        mod $backend {
            #[test]
            fn create_then_get_returns_the_stored_record() {
                super::create_then_get_returns_the_stored_record($factory());
            }

            #[test]
            fn update_keeps_created_at_and_refreshes_updated_at() {
                super::update_keeps_created_at_and_refreshes_updated_at($factory());
            }

            #[test]
            fn update_ignores_a_forged_created_at() {
                super::update_ignores_a_forged_created_at($factory());
            }

            #[test]
            fn updated_at_is_non_decreasing_across_updates() {
                super::updated_at_is_non_decreasing_across_updates($factory());
            }

            #[test]
            fn completion_flag_round_trips() {
                super::completion_flag_round_trips($factory());
            }

            #[test]
            fn delete_removes_the_task_permanently() {
                super::delete_removes_the_task_permanently($factory());
            }

            #[test]
            fn unknown_identifiers_are_not_found() {
                super::unknown_identifiers_are_not_found($factory());
            }

            #[test]
            fn get_all_on_empty_store_is_empty() {
                super::get_all_on_empty_store_is_empty($factory());
            }

            #[test]
            fn get_all_returns_every_stored_task() {
                super::get_all_returns_every_stored_task($factory());
            }

            #[test]
            fn identifiers_are_never_reused() {
                super::identifiers_are_never_reused($factory());
            }

            #[test]
            fn returned_tasks_are_detached_copies() {
                super::returned_tasks_are_detached_copies($factory());
            }
        }
    };
}

repository_contract!(memory, crate::common::memory_backend);
repository_contract!(sqlite_in_memory, crate::common::sqlite_memory_backend);
repository_contract!(sqlite_file, crate::common::sqlite_file_backend);
