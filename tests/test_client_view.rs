use todos::basic::error::TodosError;
use todos::basic::result::TodosResult;
use todos::client::view::{format_deadline_display, map_priority, parse_datetime, sort_todos, SortOrder, SortState, SortType, TodoListView};
use todos::dto::todo_dto::TodoDetailResp;

fn todo(id: i32, name: &str, prio: Option<i32>, deadline: Option<&str>) -> TodoDetailResp {
    TodoDetailResp {
        id,
        name: name.to_string(),
        description: None,
        prio,
        deadline: deadline.map(|deadline| deadline.to_string()),
    }
}

fn ids(items: &[TodoDetailResp]) -> Vec<i32> {
    items.iter().map(|item| item.id).collect()
}

#[tokio::test]
async fn test_map_priority_and_datetime() -> TodosResult<()> {
    assert_eq!(map_priority(None), 4);
    assert_eq!(map_priority(Some(1)), 1);
    assert_eq!(map_priority(Some(2)), 2);
    assert_eq!(map_priority(Some(3)), 3);
    assert_eq!(map_priority(Some(99)), 4);
    assert_eq!(map_priority(Some(0)), 4);

    assert_eq!(format_deadline_display(Some("2024-05-01 10:30:00")), "01.05.2024 10:30");
    assert_eq!(format_deadline_display(None), "");
    assert_eq!(format_deadline_display(Some("garbage")), "");

    assert_eq!(parse_datetime("2024-05-01 10:30:00")?, "2024-05-01T10:30");
    assert_eq!(parse_datetime("2024-05-01T10:30")?, "2024-05-01T10:30");
    assert!(matches!(parse_datetime(""), Err(TodosError::ValidationError(_))));
    assert!(matches!(parse_datetime("garbage"), Err(TodosError::ValidationError(_))));

    Ok(())
}

#[tokio::test]
async fn test_sort_todos() -> TodosResult<()> {
    let mut sort = SortState::default();
    assert_eq!(sort.sort_type, SortType::Name);
    assert_eq!(sort.sort_order, SortOrder::Asc);
    sort.toggle(SortType::Name);
    assert_eq!(sort.sort_order, SortOrder::Desc);
    sort.toggle(SortType::Name);
    assert_eq!(sort.sort_order, SortOrder::Asc);
    sort.toggle(SortType::Name);
    sort.toggle(SortType::Prio);
    assert_eq!(
        sort,
        SortState {
            sort_type: SortType::Prio,
            sort_order: SortOrder::Asc
        }
    );
    assert_eq!(SortType::Deadline.to_string(), "deadline");
    assert_eq!(SortOrder::Desc.to_string(), "desc");

    let mut items = vec![todo(1, "b", Some(2), None), todo(2, "c", None, None), todo(3, "a", Some(1), None)];
    sort_todos(&mut items, &sort);
    assert_eq!(items.iter().map(|item| item.prio).collect::<Vec<_>>(), vec![Some(1), Some(2), None]);
    sort.toggle(SortType::Prio);
    sort_todos(&mut items, &sort);
    assert_eq!(items.iter().map(|item| item.prio).collect::<Vec<_>>(), vec![None, Some(2), Some(1)]);

    // Equal keys keep id order in both directions
    let mut items = vec![todo(3, "x", Some(1), None), todo(1, "y", Some(1), None), todo(2, "z", Some(2), None)];
    sort_todos(&mut items, &SortState { sort_type: SortType::Prio, sort_order: SortOrder::Asc });
    assert_eq!(ids(&items), vec![1, 3, 2]);
    sort_todos(&mut items, &SortState { sort_type: SortType::Prio, sort_order: SortOrder::Desc });
    assert_eq!(ids(&items), vec![2, 1, 3]);

    let mut items = vec![
        todo(1, "a", None, Some("2024-05-02 09:00:00")),
        todo(2, "b", None, None),
        todo(3, "c", None, Some("2024-05-01 18:00:00")),
    ];
    sort_todos(&mut items, &SortState { sort_type: SortType::Deadline, sort_order: SortOrder::Asc });
    assert_eq!(ids(&items), vec![3, 1, 2]);
    sort_todos(&mut items, &SortState { sort_type: SortType::Deadline, sort_order: SortOrder::Desc });
    assert_eq!(ids(&items), vec![2, 1, 3]);

    let mut items = vec![todo(1, "banana", None, None), todo(2, "Apple", None, None), todo(3, "cherry", None, None)];
    sort_todos(&mut items, &SortState::default());
    assert_eq!(ids(&items), vec![2, 1, 3]);

    Ok(())
}

#[tokio::test]
async fn test_todo_list_view() -> TodosResult<()> {
    let mut view = TodoListView::new(vec![todo(1, "b", Some(2), None), todo(2, "a", None, None), todo(3, "c", Some(1), None)]);
    assert_eq!(ids(view.items()), vec![2, 1, 3]);
    view.toggle_sort(SortType::Prio);
    assert_eq!(ids(view.items()), vec![3, 1, 2]);
    assert_eq!(view.sort_state().sort_type, SortType::Prio);

    // Only one editor is open at a time
    assert_eq!(view.open_editor_id(), None);
    view.open_editor(1)?;
    assert_eq!(view.open_editor_id(), Some(1));
    view.open_editor(3)?;
    assert_eq!(view.open_editor_id(), Some(3));
    assert!(matches!(view.open_editor(42), Err(TodosError::NotFound(_))));
    assert_eq!(view.open_editor_id(), Some(3));
    view.close_editor();
    assert_eq!(view.open_editor_id(), None);

    // Optimistic completion, reverted on error
    view.begin_complete(1)?;
    assert!(view.is_completing(1));
    view.finish_complete(1, Err(TodosError::InternalError("server unavailable".to_string())));
    assert!(!view.is_completing(1));
    assert_eq!(ids(view.items()), vec![3, 1, 2]);
    assert!(view.error.as_deref().unwrap_or_default().contains("server unavailable"));

    view.open_editor(1)?;
    view.begin_complete(1)?;
    assert_eq!(view.error, None);
    view.finish_complete(1, Ok(()));
    assert!(!view.is_completing(1));
    assert_eq!(ids(view.items()), vec![3, 2]);
    assert_eq!(view.open_editor_id(), None);
    assert!(view.begin_complete(1).is_err());

    view.open_editor(2)?;
    view.reload(vec![todo(3, "c", Some(1), None), todo(4, "d", Some(3), None)]);
    assert_eq!(ids(view.items()), vec![3, 4]);
    assert_eq!(view.open_editor_id(), None);

    Ok(())
}
