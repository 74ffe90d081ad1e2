use actix_web::web;

pub mod apply;
pub mod pages;
pub mod sendmail;

/// Registers every public route. Callers provide `web::Data<SiteConfig>` and
/// `web::Data<ApplicationValidator>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::index_handler)
        .service(pages::contact_handler)
        .service(pages::thank_you_handler)
        .service(sendmail::sendmail_handler)
        .service(apply::apply_handler);
}
