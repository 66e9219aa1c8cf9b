use actix_web::{HttpResponse, Responder, get, post, web};

use crate::catalog::QuestionCatalog;
use crate::dto::submissions::{
    GeneratedQuestionsResponse, HealthResponse, ProductCreatedResponse, ProductListResponse,
};
use crate::forms::submissions::{GenerateQuestionsForm, SubmitProductForm};
use crate::repository::InMemoryRepository;
use crate::routes::error_response;
use crate::services::questions::generate_questions as generate_questions_service;
use crate::services::reports::download_report as download_report_service;
use crate::services::submissions::{
    list_products as list_products_service, submit_product as submit_product_service,
};

#[get("/api/products")]
pub async fn list_products(repo: web::Data<InMemoryRepository>) -> impl Responder {
    match list_products_service(repo.get_ref()) {
        Ok(submissions) => HttpResponse::Ok().json(ProductListResponse::new(submissions)),
        Err(err) => error_response("fetch products", err),
    }
}

#[post("/api/products")]
pub async fn submit_product(
    form: web::Json<SubmitProductForm>,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    match submit_product_service(form.into_inner(), repo.get_ref()) {
        Ok(submission) => HttpResponse::Created().json(ProductCreatedResponse::new(submission)),
        Err(err) => error_response("save product", err),
    }
}

#[post("/api/generate-questions")]
pub async fn generate_questions(
    form: web::Json<GenerateQuestionsForm>,
    catalog: web::Data<QuestionCatalog>,
) -> impl Responder {
    match generate_questions_service(form.into_inner(), catalog.get_ref()) {
        Ok(questions) => HttpResponse::Ok().json(GeneratedQuestionsResponse::new(questions)),
        Err(err) => error_response("generate questions", err),
    }
}

#[get("/api/products/{product_id}/report")]
pub async fn download_report(
    product_id: web::Path<i64>,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    match download_report_service(product_id.into_inner(), repo.get_ref()) {
        Ok(file) => HttpResponse::Ok()
            .append_header(("Content-Type", file.content_type))
            .append_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", file.file_name),
            ))
            .body(file.bytes),
        Err(err) => error_response("generate report", err),
    }
}

#[get("/api/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::new())
}
