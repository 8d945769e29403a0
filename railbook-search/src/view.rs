use railbook_core::TrainInfo;
use crate::filter::FilterState;
use crate::sort::SortState;

/// Copies of the trains passing the filters, in input order
pub fn filter_trains(trains: &[TrainInfo], filters: &FilterState) -> Vec<TrainInfo> {
    trains
        .iter()
        .filter(|train| filters.matches(train))
        .cloned()
        .collect()
}

/// Render-ready train list: filtered copies of the input, stably sorted.
pub fn view(trains: &[TrainInfo], filters: &FilterState, sort: &SortState) -> Vec<TrainInfo> {
    let mut visible = filter_trains(trains, filters);
    sort.sort(&mut visible);

    tracing::debug!(
        total = trains.len(),
        visible = visible.len(),
        sort_key = ?sort.key,
        direction = ?sort.direction,
        "Train list view computed"
    );

    visible
}
