use crate::{
    api::{attendance, payroll, personnel, settings, stakeholder, villa},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_api_per_min))
            .service(
                web::scope("/personnel")
                    // /personnel
                    .service(
                        web::resource("")
                            .route(web::post().to(personnel::create_personnel))
                            .route(web::get().to(personnel::list_personnel)),
                    )
                    // /personnel/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(personnel::get_personnel))
                            .route(web::put().to(personnel::update_personnel))
                            .route(web::delete().to(personnel::delete_personnel)),
                    ),
            )
            .service(
                web::scope("/villas")
                    .service(
                        web::resource("")
                            .route(web::post().to(villa::create_villa))
                            .route(web::get().to(villa::list_villas)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(villa::get_villa))
                            .route(web::put().to(villa::update_villa))
                            .route(web::delete().to(villa::delete_villa)),
                    ),
            )
            .service(
                web::scope("/stakeholders")
                    .service(
                        web::resource("")
                            .route(web::post().to(stakeholder::create_stakeholder))
                            .route(web::get().to(stakeholder::list_stakeholders)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(stakeholder::get_stakeholder))
                            .route(web::put().to(stakeholder::update_stakeholder))
                            .route(web::delete().to(stakeholder::delete_stakeholder)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance — one merge-style edit per call
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::edit_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    ),
            )
            .service(
                web::scope("/settings").service(
                    web::resource("")
                        .route(web::get().to(settings::get_settings))
                        .route(web::put().to(settings::update_settings)),
                ),
            )
            .service(
                web::scope("/payroll")
                    // computation is heavier than the rest; own limiter
                    .wrap(build_limiter(config.rate_payroll_per_min))
                    .service(
                        web::resource("")
                            .route(web::post().to(payroll::create_payroll))
                            .route(web::get().to(payroll::list_payrolls)),
                    )
                    // /payroll/{id}
                    .service(web::resource("/{id}").route(web::get().to(payroll::get_payroll)))
                    // /payroll/{id}/payslip
                    .service(
                        web::resource("/{id}/payslip").route(web::get().to(payroll::get_payslip)),
                    ),
            ),
    );
}
