//! Segmentation page: CSV upload form and generated insights.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::{DataTreatment, SegmentationRequest, User};
use crate::state::AppState;
use crate::utils::csv_sample::sample_csv;
use crate::web::view::InsightsView;

pub const DEFAULT_CLUSTERS: i64 = 3;

/// Upper bound for the uploaded CSV.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Template, WebTemplate)]
#[template(path = "segmentation.html")]
pub struct SegmentationTemplate {
    pub user: User,
    pub form: SegmentationForm,
    pub error: Option<String>,
    pub result: Option<InsightsView>,
}

/// Form state echoed back into the page.
#[derive(Debug, Clone)]
pub struct SegmentationForm {
    pub file_name: String,
    pub number_of_clusters: String,
    pub normalize: bool,
    pub exclude_nulls: bool,
    pub group_categories: bool,
}

impl Default for SegmentationForm {
    fn default() -> Self {
        let treatment = DataTreatment::default();
        Self {
            file_name: String::new(),
            number_of_clusters: DEFAULT_CLUSTERS.to_string(),
            normalize: treatment.normalize,
            exclude_nulls: treatment.exclude_nulls,
            group_categories: treatment.group_categories,
        }
    }
}

/// Raw multipart submission.
struct Upload {
    form: SegmentationForm,
    csv: Option<String>,
}

/// `GET /segmentation`
pub async fn segmentation_page(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> impl IntoResponse {
    SegmentationTemplate {
        user,
        form: SegmentationForm::default(),
        error: None,
        result: None,
    }
}

/// `POST /segmentation`
///
/// Samples the uploaded CSV, asks for insights and makes them the user's
/// current dashboard analysis. On failure the current analysis is cleared.
pub async fn segmentation_submit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    multipart: Multipart,
) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(message) => {
            return render_error(user, SegmentationForm::default(), message);
        }
    };
    let form = upload.form;

    let Some(csv) = upload.csv.filter(|_| !form.file_name.is_empty()) else {
        return render_error(user, form, "No file selected".to_string());
    };

    let number_of_clusters = match form.number_of_clusters.trim().parse::<i64>() {
        Ok(n) if n >= 1 => n,
        _ => {
            return render_error(
                user,
                form,
                "The number of segments must be a whole number of at least 1.".to_string(),
            );
        }
    };

    let cluster_data = sample_csv(&csv);
    if cluster_data.is_empty() {
        return render_error(user, form, "The selected file is empty.".to_string());
    }

    let request = SegmentationRequest {
        cluster_data,
        data_treatment: DataTreatment {
            normalize: form.normalize,
            exclude_nulls: form.exclude_nulls,
            group_categories: form.group_categories,
        },
        number_of_clusters,
    };

    match state.segmentation_service.generate_insights(request).await {
        Ok(insights) => {
            let result = InsightsView::from(&insights);
            state.analysis_cache.put(user.id, insights).await;
            SegmentationTemplate {
                user,
                form,
                error: None,
                result: Some(result),
            }
            .into_response()
        }
        Err(e) => {
            tracing::warn!(user_id = user.id, error = %e, "Segmentation failed");
            state.analysis_cache.clear(user.id).await;
            (
                e.status(),
                SegmentationTemplate {
                    user,
                    form,
                    error: Some(format!(
                        "An error occurred while generating the insights: {}",
                        e.message()
                    )),
                    result: None,
                },
            )
                .into_response()
        }
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, String> {
    // Unchecked checkboxes are not submitted at all.
    let mut form = SegmentationForm {
        normalize: false,
        exclude_nulls: false,
        group_categories: false,
        ..SegmentationForm::default()
    };
    let mut csv = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Could not read the upload: {}", e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                form.file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Could not read the upload: {}", e.body_text()))?;
                csv = Some(String::from_utf8_lossy(&bytes).into_owned());
            }
            "number_of_clusters" => {
                form.number_of_clusters = field.text().await.unwrap_or_default();
            }
            "normalize" => form.normalize = true,
            "exclude_nulls" => form.exclude_nulls = true,
            "group_categories" => form.group_categories = true,
            _ => {}
        }
    }

    Ok(Upload { form, csv })
}

fn render_error(user: User, form: SegmentationForm, message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        SegmentationTemplate {
            user,
            form,
            error: Some(message),
            result: None,
        },
    )
        .into_response()
}
