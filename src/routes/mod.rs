pub mod health;
pub mod task;
pub mod user;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(user::signup)
            .service(user::signin)
            .service(user::info),
    )
    .service(
        web::scope("/task")
            .service(task::create_task)
            .service(task::get_tasks)
            .service(task::update_task)
            .service(task::update_status)
            .service(task::delete_task),
    );
}
