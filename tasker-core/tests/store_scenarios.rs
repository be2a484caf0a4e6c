use chrono::{DateTime, TimeZone, Utc};
use tasker_core::{TaskOrganizer, TaskStatus};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
}

/// Deleting the lowest id makes it the next candidate for allocation.
#[test]
fn id_recycling_after_delete() {
    let mut org = TaskOrganizer::new();

    assert_eq!(org.add("Buy milk", "", noon()), 0);
    assert_eq!(org.add("Walk dog", "", noon()), 1);

    org.delete(0).unwrap();
    assert_eq!(org.add("Pay bills", "", noon()), 0);

    let committed = org.tasks_in_status(TaskStatus::Committed);
    assert_eq!(committed.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(committed[&0].title, "Pay bills");
    assert_eq!(committed[&1].title, "Walk dog");
}

/// Marking a task done moves it between status filters, id unchanged.
#[test]
fn mark_done_moves_task_between_filters() {
    let mut org = TaskOrganizer::new();
    org.add("Buy milk", "", noon());
    org.add("Walk dog", "", noon());

    let returned = org.update(1, None, None, Some("done"), noon()).unwrap();
    assert_eq!(returned, 1);
    assert_eq!(org.get(1).unwrap().status, TaskStatus::Done);

    let done = org.tasks_in_status(TaskStatus::Done);
    assert_eq!(done.keys().copied().collect::<Vec<_>>(), vec![1]);
    assert_eq!(
        org.tasks_in_status(TaskStatus::Committed)
            .keys()
            .copied()
            .collect::<Vec<_>>(),
        vec![0]
    );
}

/// A store with every status survives a save/load cycle unchanged.
#[test]
fn full_store_round_trips_through_persisted_form() {
    let mut org = TaskOrganizer::new();
    org.add("committed task", "still waiting", noon());
    org.add("started task", "", noon());
    org.add("finished task", "all done", noon());
    org.add("dropped task", "", noon());
    org.update(1, None, None, Some("in_progress"), noon()).unwrap();
    org.update(2, None, None, Some("done"), noon()).unwrap();
    org.update(3, None, None, Some("cancelled"), noon()).unwrap();

    let mut restored = TaskOrganizer::new();
    restored.loads(&org.dumps()).unwrap();

    assert_eq!(restored, org);
    for (id, task) in org.iter() {
        let loaded = restored.get(id).unwrap();
        assert_eq!(loaded.status, task.status);
        assert_eq!(loaded.creation_date, task.creation_date);
        assert_eq!(loaded.update_date, task.update_date);
    }
}
