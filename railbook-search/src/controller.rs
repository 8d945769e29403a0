use chrono::NaiveDate;
use railbook_core::{SearchConditions, SearchPassengerType, SearchTrainType, TrainInfo};
use crate::filter::{DisplayToggle, FilterCategory, FilterState};
use crate::sort::{SortKey, SortState};
use crate::view::view;

/// Synchronous notifications to the surrounding UI shell
pub trait TrainListListener {
    fn on_conditions_change(&mut self, _conditions: &SearchConditions) {}
    fn on_filters_change(&mut self, _filters: &FilterState) {}
    fn on_train_select(&mut self, _train: &TrainInfo) {}
}

/// Listener that ignores every notification
pub struct NoopListener;

impl TrainListListener for NoopListener {}

/// State behind the train list page: query bar, filter panel and column sort.
/// Every mutation notifies the listener with the new state.
pub struct TrainListController<L: TrainListListener> {
    conditions: SearchConditions,
    filters: FilterState,
    sort: SortState,
    listener: L,
}

impl<L: TrainListListener> TrainListController<L> {
    pub fn new(conditions: SearchConditions, listener: L) -> Self {
        Self {
            conditions,
            filters: FilterState::default(),
            sort: SortState::default(),
            listener,
        }
    }

    pub fn conditions(&self) -> &SearchConditions {
        &self.conditions
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn swap_stations(&mut self) {
        self.conditions.swap_stations();
        self.listener.on_conditions_change(&self.conditions);
    }

    pub fn set_depart_date(&mut self, date: NaiveDate) {
        self.conditions.depart_date = date;
        self.listener.on_conditions_change(&self.conditions);
    }

    pub fn set_passenger_type(&mut self, passenger_type: SearchPassengerType) {
        self.conditions.passenger_type = passenger_type;
        self.listener.on_conditions_change(&self.conditions);
    }

    pub fn set_train_type(&mut self, train_type: SearchTrainType) {
        self.conditions.train_type = train_type;
        self.listener.on_conditions_change(&self.conditions);
    }

    /// Check or uncheck one value of a filter category. Checking twice keeps a single entry.
    pub fn set_filter(&mut self, category: FilterCategory, value: &str, checked: bool) {
        let values = self.filters.values_mut(category);
        if checked {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        } else {
            values.retain(|v| v != value);
        }
        self.listener.on_filters_change(&self.filters);
    }

    pub fn set_toggle(&mut self, toggle: DisplayToggle, enabled: bool) {
        self.filters.set_toggle(toggle, enabled);
        self.listener.on_filters_change(&self.filters);
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.listener.on_filters_change(&self.filters);
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
    }

    /// Forward a booking click. Trains that cannot be booked are ignored.
    pub fn select_train(&mut self, train: &TrainInfo) -> bool {
        if !train.can_book {
            return false;
        }
        self.listener.on_train_select(train);
        true
    }

    pub fn view(&self, trains: &[TrainInfo]) -> Vec<TrainInfo> {
        view(trains, &self.filters, &self.sort)
    }
}
