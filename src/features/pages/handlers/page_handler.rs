use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    response::{Html, Redirect},
    Form,
};

use crate::core::error::Result;
use crate::features::pages::dtos::*;
use crate::features::pages::services::PageService;
use crate::features::reports::dtos::{ReportForm, ReportSubmission};
use crate::features::reviews::dtos::ReviewForm;
use crate::shared::templates::render_page;

pub async fn index_page(State(service): State<Arc<PageService>>) -> Result<Html<String>> {
    let ctx = service.index().await;
    Ok(Html(render_page("index.jinja", &ctx)?))
}

pub async fn peta_page(State(service): State<Arc<PageService>>) -> Result<Html<String>> {
    Ok(Html(render_page("peta.jinja", &service.peta())?))
}

pub async fn laporan_page(
    State(service): State<Arc<PageService>>,
    Query(query): Query<LaporanPageQuery>,
) -> Result<Html<String>> {
    let tab = LaporanTab::from_query(query.tab.as_deref());
    let ctx = service.laporan(tab, ReportForm::default(), Vec::new()).await;
    Ok(Html(render_page("laporan.jinja", &ctx)?))
}

/// Multipart post of the report form, re-rendering the page with the outcome
pub async fn submit_laporan(
    State(service): State<Arc<PageService>>,
    multipart: Multipart,
) -> Result<Html<String>> {
    let submission = ReportSubmission::from_multipart(multipart).await?;
    let ctx = service.submit_report(submission).await;
    Ok(Html(render_page("laporan.jinja", &ctx)?))
}

pub async fn review_page(
    State(service): State<Arc<PageService>>,
    Query(query): Query<ReviewPageQuery>,
) -> Result<Html<String>> {
    let tab = ReviewTab::from_query(query.tab.as_deref());
    let ctx = service
        .review(tab, query.rth_filter(), ReviewForm::default(), Vec::new())
        .await;
    Ok(Html(render_page("review.jinja", &ctx)?))
}

pub async fn submit_review(
    State(service): State<Arc<PageService>>,
    Form(form): Form<ReviewForm>,
) -> Result<Html<String>> {
    let ctx = service.submit_review(form).await;
    Ok(Html(render_page("review.jinja", &ctx)?))
}

pub async fn admin_page(
    State(service): State<Arc<PageService>>,
    Query(query): Query<AdminPageQuery>,
) -> Result<Html<String>> {
    let ctx = service.admin(query).await;
    Ok(Html(render_page("admin.jinja", &ctx)?))
}

/// Status button on the admin table; redirects back so a reload cannot repeat it
pub async fn change_report_status(
    State(service): State<Arc<PageService>>,
    Path(id): Path<String>,
    Form(form): Form<StatusChangeForm>,
) -> Redirect {
    Redirect::to(&service.change_status(&id, &form).await)
}
