//! Report aggregations.
//!
//! Pure functions over repository reads; handlers compose them and decide
//! who may see what. No export formats live here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::bookings::BookingStatus;
use crate::domain::catalogue::{EquipmentCategory, EquipmentItem};

/// Booking counts per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusBreakdown {
    pub pending: u64,
    pub confirmed: u64,
    pub rejected: u64,
    pub completed: u64,
    pub cancelled: u64,
}

impl BookingStatusBreakdown {
    /// Total number of bookings counted.
    pub fn total(&self) -> u64 {
        self.pending + self.confirmed + self.rejected + self.completed + self.cancelled
    }

    /// Bookings that currently occupy their interval.
    pub fn active(&self) -> u64 {
        self.pending + self.confirmed
    }
}

/// Count bookings per status.
pub fn booking_status_breakdown<I>(statuses: I) -> BookingStatusBreakdown
where
    I: IntoIterator<Item = BookingStatus>,
{
    let mut breakdown = BookingStatusBreakdown::default();
    for status in statuses {
        match status {
            BookingStatus::Pending => breakdown.pending += 1,
            BookingStatus::Confirmed => breakdown.confirmed += 1,
            BookingStatus::Rejected => breakdown.rejected += 1,
            BookingStatus::Completed => breakdown.completed += 1,
            BookingStatus::Cancelled => breakdown.cancelled += 1,
        }
    }
    breakdown
}

/// Equipment counts for the admin overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueOverview {
    pub total_equipment: u64,
    pub available: u64,
    pub in_maintenance: u64,
    /// Items per category name, sorted by name.
    pub per_category: BTreeMap<String, u64>,
}

/// Aggregate equipment counts, grouping items under their category name.
///
/// Items referencing an unknown category are grouped under their category
/// id so the totals still add up.
pub fn catalogue_overview(
    items: &[EquipmentItem],
    categories: &[EquipmentCategory],
) -> CatalogueOverview {
    let names: BTreeMap<_, _> = categories
        .iter()
        .map(|category| (category.id(), category.name()))
        .collect();
    let mut overview = CatalogueOverview {
        total_equipment: items.len() as u64,
        ..CatalogueOverview::default()
    };
    for item in items {
        if item.is_available() {
            overview.available += 1;
        } else {
            overview.in_maintenance += 1;
        }
        let name = names
            .get(&item.category_id())
            .map_or_else(|| item.category_id().to_string(), |name| (*name).to_owned());
        *overview.per_category.entry(name).or_insert(0) += 1;
    }
    overview
}
