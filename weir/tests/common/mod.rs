#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Arc, sync::Mutex};
use weir::{
    App, BoxError, Callable, Params, Registry, RegistryBuilder, Request, ResponseHandle, Route,
    RouteOptions, RouteResult, Status, Value,
};

// ============================================================================
// Users
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: Option<u64>, name: &str, email: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
        }
    }
}

#[derive(Debug, Default)]
pub struct TestRepository {
    data: Mutex<BTreeMap<u64, User>>,
}

impl TestRepository {
    pub fn all(&self) -> Vec<User> {
        self.data.lock().unwrap().values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Option<User> {
        self.data.lock().unwrap().get(&id).cloned()
    }

    pub fn push(&self, mut user: User) -> User {
        let mut data = self.data.lock().unwrap();
        let id = data.len() as u64 + 1;
        user.id = Some(id);
        data.insert(id, user.clone());
        user
    }

    pub fn update(&self, user: User) -> User {
        if let Some(id) = user.id {
            self.data.lock().unwrap().insert(id, user.clone());
        }
        user
    }

    pub fn delete(&self, id: u64) {
        self.data.lock().unwrap().remove(&id);
    }
}

/// Behavior shared by the object controller and the lambda controllers.
pub mod actions {
    use super::*;

    pub fn index(repo: &TestRepository) -> Vec<User> {
        repo.all()
    }

    pub fn show(response: &ResponseHandle, repo: &TestRepository, user_id: u64) -> Option<User> {
        let user = repo.get(user_id);
        if user.is_none() {
            response.set_status(Status::NOT_FOUND);
        }
        user
    }

    pub fn create(response: &ResponseHandle, repo: &TestRepository, params: &Params) -> Option<User> {
        let user = User::new(
            None,
            params.get("name").unwrap_or_default(),
            params.get("email").unwrap_or_default(),
        );
        if params.iter().any(|(_, value)| value.is_empty()) {
            response.set_status(Status::UNPROCESSABLE_ENTITY);
            Some(user)
        } else {
            response.set_status(Status::CREATED);
            Some(repo.push(user))
        }
    }

    pub fn update(
        response: &ResponseHandle,
        repo: &TestRepository,
        user_id: u64,
        params: &Params,
    ) -> Option<User> {
        let Some(mut user) = repo.get(user_id) else {
            response.set_status(Status::NOT_FOUND);
            return None;
        };
        if let Some(name) = params.get("name") {
            user.name = name.to_owned();
        }
        if let Some(email) = params.get("email") {
            user.email = email.to_owned();
        }
        if user.name.is_empty() || user.email.is_empty() {
            response.set_status(Status::UNPROCESSABLE_ENTITY);
            Some(user)
        } else {
            Some(repo.update(user))
        }
    }

    pub fn destroy(response: &ResponseHandle, repo: &TestRepository, user_id: u64) -> Option<User> {
        if repo.get(user_id).is_some() {
            repo.delete(user_id);
        } else {
            response.set_status(Status::NOT_FOUND);
        }
        None
    }
}

pub struct UsersController {
    response: ResponseHandle,
    repo: Arc<TestRepository>,
}

#[weir::component(name = "users")]
impl UsersController {
    pub fn new(response: ResponseHandle, repo: Arc<TestRepository>) -> Self {
        Self { response, repo }
    }

    pub fn index(&self) -> Vec<User> {
        actions::index(&self.repo)
    }

    pub fn show(&self, user_id: u64) -> Option<User> {
        actions::show(&self.response, &self.repo, user_id)
    }

    pub fn create(&self, params: Params) -> Option<User> {
        actions::create(&self.response, &self.repo, &params)
    }

    pub fn update(&self, user_id: u64, params: Params) -> Option<User> {
        actions::update(&self.response, &self.repo, user_id, &params)
    }

    pub fn destroy(&self, user_id: u64) -> Option<User> {
        actions::destroy(&self.response, &self.repo, user_id)
    }
}

// ============================================================================
// Registries
// ============================================================================

pub fn register_controller(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register("repositories.user", TestRepository::default())
        .namespace("controllers", |ns| {
            ns.register_factory(
                "users",
                |response: ResponseHandle, repo: Arc<TestRepository>| -> Result<Value, BoxError> {
                    Ok(Value::component(UsersController::new(response, repo)))
                },
            )
        })
}

pub fn register_lambdas(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register("repositories.user", TestRepository::default())
        .namespace("controllers", |ns| {
            ns.register_factory("index_users", |repo: Arc<TestRepository>| -> Result<Callable, BoxError> {
                Ok(Callable::from_fn(move || -> Result<Vec<User>, BoxError> {
                    Ok(actions::index(&repo))
                }))
            })
            .register_factory(
                "show_user",
                |response: ResponseHandle, repo: Arc<TestRepository>| -> Result<Callable, BoxError> {
                    Ok(Callable::from_fn(move |user_id: u64| -> Result<Option<User>, BoxError> {
                        Ok(actions::show(&response, &repo, user_id))
                    }))
                },
            )
            .register_factory(
                "create_user",
                |response: ResponseHandle, repo: Arc<TestRepository>| -> Result<Callable, BoxError> {
                    Ok(Callable::from_fn(move |params: Params| -> Result<Option<User>, BoxError> {
                        Ok(actions::create(&response, &repo, &params))
                    }))
                },
            )
            .register_factory(
                "update_user",
                |response: ResponseHandle, repo: Arc<TestRepository>| -> Result<Callable, BoxError> {
                    Ok(Callable::from_fn(
                        move |user_id: u64, params: Params| -> Result<Option<User>, BoxError> {
                            Ok(actions::update(&response, &repo, user_id, &params))
                        },
                    ))
                },
            )
            .register_factory(
                "destroy_user",
                |response: ResponseHandle, repo: Arc<TestRepository>| -> Result<Callable, BoxError> {
                    Ok(Callable::from_fn(move |user_id: u64| -> Result<Option<User>, BoxError> {
                        Ok(actions::destroy(&response, &repo, user_id))
                    }))
                },
            )
        })
}

// ============================================================================
// Routing Trees
// ============================================================================

/// Every route declares its own injections.
pub fn controller_routes(r: &mut Request<'_>) -> RouteResult {
    r.get(Route::new("ping").handle(|| -> Result<&'static str, BoxError> { Ok("pong") }))?;

    r.on("users", |r, _| {
        r.resolve(["repositories.user"], |r, deps| {
            let response = Value::new(r.response());
            let repo = deps[0].clone();
            let inject = [response, repo];

            r.is("", |r, _| {
                r.get(Route::new("").to("controllers.users#index").inject(inject.clone()))?;
                let params = r.params();
                r.post(
                    Route::new("")
                        .to("controllers.users#create")
                        .inject(inject.clone())
                        .call_with([params]),
                )
            })?;

            r.on(":user_id", |r, captures| {
                let user_id = Value::new(captures[0].clone());
                r.get(
                    Route::new("")
                        .to("controllers.users#show")
                        .inject(inject.clone())
                        .call_with([user_id.clone()]),
                )?;
                let params = Value::new(r.params());
                r.put(
                    Route::new("")
                        .to("controllers.users#update")
                        .inject(inject.clone())
                        .call_with([user_id.clone(), params]),
                )?;
                r.delete(
                    Route::new("")
                        .to("controllers.users#destroy")
                        .inject(inject.clone())
                        .call_with([user_id]),
                )
            })
        })
    })
}

/// Injections and arguments come from nested defaults scopes.
pub fn controller_routes_with_defaults(r: &mut Request<'_>) -> RouteResult {
    r.on("defaults", |r, _| {
        r.on("users", |r, _| {
            r.resolve(["repositories.user"], |r, deps| {
                let defaults = RouteOptions::new()
                    .inject([Value::new(r.response()), deps[0].clone()])
                    .call_with([r.params()]);

                r.with_defaults(defaults, |r| {
                    r.is("", |r, _| {
                        r.get(Route::new("").to("controllers.users#index").cancel_call_with())?;
                        r.post(Route::new("").to("controllers.users#create"))
                    })?;

                    r.on(":user_id", |r, captures| {
                        let user_id = Value::new(captures[0].clone());
                        r.with_defaults(RouteOptions::new().call_with([user_id.clone()]), |r| {
                            r.get(Route::new("").to("controllers.users#show"))?;
                            let params = Value::new(r.params());
                            r.put(
                                Route::new("")
                                    .to("controllers.users#update")
                                    .call_with([user_id.clone(), params]),
                            )?;
                            r.delete(Route::new("").to("controllers.users#destroy"))
                        })
                    })
                })
            })
        })
    })
}

/// Lambda controllers, configured through nested defaults scopes.
pub fn lambda_routes_with_defaults(r: &mut Request<'_>) -> RouteResult {
    r.on("defaults", |r, _| {
        r.on("users", |r, _| {
            r.resolve(["repositories.user"], |r, deps| {
                let repo = deps[0].clone();
                let defaults = RouteOptions::new()
                    .inject([Value::new(r.response()), repo.clone()])
                    .call_with([r.params()]);

                r.with_defaults(defaults, |r| {
                    r.is("", |r, _| {
                        r.get(
                            Route::new("")
                                .to("controllers.index_users")
                                .inject([repo.clone()])
                                .cancel_call_with(),
                        )?;
                        r.post(Route::new("").to("controllers.create_user"))
                    })?;

                    r.on(":user_id", |r, captures| {
                        let user_id = Value::new(captures[0].clone());
                        r.with_defaults(RouteOptions::new().call_with([user_id.clone()]), |r| {
                            r.get(Route::new("").to("controllers.show_user"))?;
                            let params = Value::new(r.params());
                            r.put(
                                Route::new("")
                                    .to("controllers.update_user")
                                    .call_with([user_id.clone(), params]),
                            )?;
                            r.delete(Route::new("").to("controllers.destroy_user"))
                        })
                    })
                })
            })
        })
    })
}

// ============================================================================
// Helpers
// ============================================================================

pub fn controller_app() -> App {
    let registry = register_controller(Registry::builder()).build();
    App::builder(registry).routes(controller_routes).build()
}

pub fn controller_app_with_defaults() -> App {
    let registry = register_controller(Registry::builder()).build();
    App::builder(registry)
        .routes(controller_routes_with_defaults)
        .build()
}

pub fn lambda_app_with_defaults() -> App {
    let registry = register_lambdas(Registry::builder()).build();
    App::builder(registry)
        .routes(lambda_routes_with_defaults)
        .build()
}

pub fn repository(app: &App) -> Arc<TestRepository> {
    app.registry()
        .resolve("repositories.user")
        .unwrap()
        .downcast::<TestRepository>()
        .unwrap()
}

pub fn seed(app: &App) -> Vec<User> {
    let repo = repository(app);
    vec![
        repo.push(User::new(None, "John", "john@gotmail.com")),
        repo.push(User::new(None, "Jill", "jill@gotmail.com")),
    ]
}
