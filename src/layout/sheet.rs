use serde::Serialize;

use super::descriptor::{LabelSize, LayoutDescriptor};
use crate::print_jobs::PrintJob;

/// One label placed on the printed grid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCell {
    pub page: usize,
    pub row: usize,
    pub column: usize,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub qr_url: String,
}

/// A print job laid out on its label grid, ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSheet {
    pub label_size: String,
    pub layout: LayoutDescriptor,
    pub rows: usize,
    pub pages: usize,
    pub cells: Vec<LabelCell>,
}

impl LabelSheet {
    /// Place every label of `job` row-major onto the grid of its size.
    ///
    /// Row count grows with the batch; `grid_rows` only decides where page
    /// breaks fall.
    pub fn arrange(job: &PrintJob) -> Self {
        let size = LabelSize::parse(&job.label_size);
        let layout = size.descriptor();
        let cols = layout.grid_cols as usize;
        let rows_per_page = layout.grid_rows as usize;

        let cells = job
            .labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let row = index / cols;
                LabelCell {
                    page: row / rows_per_page,
                    row,
                    column: index % cols,
                    title: label.title.clone(),
                    variation: label.variation.clone().filter(|v| !v.is_empty()),
                    condition: label
                        .condition
                        .clone()
                        .filter(|c| job.show_condition && !c.is_empty()),
                    identifier: label.identifier.clone(),
                    price: job.show_price.then(|| label.price.clone()),
                    qr_url: qr_url(&label.identifier, layout.qr_pixel_size),
                }
            })
            .collect();

        let rows = layout.rows_for(job.labels.len());

        Self {
            label_size: job.label_size.clone(),
            layout,
            rows,
            pages: rows.div_ceil(rows_per_page),
            cells,
        }
    }
}

/// Image URL the renderer requests for one label's QR code
pub fn qr_url(identifier: &str, size: u32) -> String {
    format!("/api/qr?url={}&size={}", urlencoding::encode(identifier), size)
}
