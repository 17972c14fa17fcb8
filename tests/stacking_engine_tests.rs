use chart_stack::core::{AlignedDataset, FillBand, initial_stacked_bands, stack_series};

fn three_series() -> AlignedDataset {
    AlignedDataset::from_values(
        vec![0.0, 1.0, 2.0],
        vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ],
    )
    .expect("valid dataset")
}

fn four_series() -> AlignedDataset {
    AlignedDataset::from_values(
        vec![10.0, 20.0],
        vec![
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
            vec![4.0, 4.0],
        ],
    )
    .expect("valid dataset")
}

#[test]
fn fully_visible_series_stack_into_running_totals() {
    let result = stack_series(&three_series(), |_| false);

    let rows = result.data.into_rows();
    assert_eq!(
        rows,
        vec![
            vec![Some(0.0), Some(1.0), Some(2.0)],
            vec![Some(12.0), Some(15.0), Some(18.0)],
            vec![Some(11.0), Some(13.0), Some(15.0)],
            vec![Some(7.0), Some(8.0), Some(9.0)],
        ]
    );
}

#[test]
fn omitted_middle_series_keeps_raw_values_and_is_excluded_from_sums() {
    let result = stack_series(&three_series(), |index| index == 2);

    let rows = result.data.into_rows();
    assert_eq!(rows[1], vec![Some(8.0), Some(10.0), Some(12.0)]);
    assert_eq!(rows[2], vec![Some(4.0), Some(5.0), Some(6.0)]);
    assert_eq!(rows[3], vec![Some(7.0), Some(8.0), Some(9.0)]);
    assert_eq!(result.bands, vec![FillBand::new(1, 3)]);
}

#[test]
fn fully_visible_bands_match_initial_bands() {
    let result = stack_series(&four_series(), |_| false);
    let expected = vec![
        FillBand::new(1, 2),
        FillBand::new(2, 3),
        FillBand::new(3, 4),
    ];
    assert_eq!(result.bands, expected);
    assert_eq!(initial_stacked_bands(4), expected);
}

#[test]
fn hidden_last_series_leaves_previous_visible_layer_unpaired() {
    let result = stack_series(&four_series(), |index| index == 4);
    assert_eq!(result.bands, vec![FillBand::new(1, 2), FillBand::new(2, 3)]);
    assert_eq!(result.data.series(3), Some(&[Some(3.0), Some(3.0)][..]));
    assert_eq!(result.data.series(4), Some(&[Some(4.0), Some(4.0)][..]));
}

#[test]
fn consecutive_hidden_series_are_bridged_by_forward_search() {
    let result = stack_series(&four_series(), |index| index == 2 || index == 3);
    assert_eq!(result.bands, vec![FillBand::new(1, 4)]);
    assert_eq!(result.data.series(1), Some(&[Some(5.0), Some(5.0)][..]));
}

#[test]
fn all_series_hidden_copies_input_and_emits_no_bands() {
    let data = three_series();
    let result = stack_series(&data, |_| true);
    assert_eq!(result.data, data);
    assert!(result.bands.is_empty());
}

#[test]
fn single_series_stacks_to_itself() {
    let data = AlignedDataset::new(vec![0.0, 1.0], vec![vec![Some(3.0), None]])
        .expect("valid dataset");
    let result = stack_series(&data, |_| false);
    assert_eq!(result.data.series(1), Some(&[Some(3.0), Some(0.0)][..]));
    assert!(result.bands.is_empty());
}

#[test]
fn missing_samples_contribute_zero() {
    let data = AlignedDataset::new(
        vec![0.0, 1.0],
        vec![
            vec![Some(1.0), Some(1.0)],
            vec![None, Some(2.0)],
            vec![Some(5.0), None],
        ],
    )
    .expect("valid dataset");
    let result = stack_series(&data, |_| false);
    assert_eq!(result.data.series(1), Some(&[Some(6.0), Some(3.0)][..]));
    assert_eq!(result.data.series(2), Some(&[Some(5.0), Some(2.0)][..]));
    assert_eq!(result.data.series(3), Some(&[Some(5.0), Some(0.0)][..]));
}

#[test]
fn stacking_is_deterministic_and_leaves_input_untouched() {
    let data = three_series();
    let snapshot = data.clone();

    let first = stack_series(&data, |index| index == 3);
    let second = stack_series(&data, |index| index == 3);

    assert_eq!(first, second);
    assert_eq!(data, snapshot);
}

#[test]
fn omit_predicate_is_queried_per_index() {
    let mut asked = Vec::new();
    let _ = stack_series(&three_series(), |index| {
        asked.push(index);
        false
    });
    for index in 1..=3 {
        assert!(asked.contains(&index), "series {index} was never queried");
    }
    assert!(!asked.contains(&0));
}

#[test]
fn empty_x_axis_keeps_shape() {
    let data = AlignedDataset::new(Vec::new(), vec![Vec::new(), Vec::new()])
        .expect("valid dataset");
    let result = stack_series(&data, |_| false);
    assert_eq!(result.data.series_count(), 2);
    assert!(result.data.is_empty());
    assert_eq!(result.bands, vec![FillBand::new(1, 2)]);
}
