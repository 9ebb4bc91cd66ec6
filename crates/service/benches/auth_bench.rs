use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::order::{self, OrderStatus};
use models::user::Role;
use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::{AuthService, Claims, TokenAuthenticator};
use service::booking::OrderLifecycle;

fn bench_token_verify(c: &mut Criterion) {
    let tokens = TokenAuthenticator::new("bench-secret", 72);
    let token = tokens.issue(42, Role::Customer).unwrap();

    c.bench_function("token_verify", |b| {
        b.iter(|| tokens.verify(black_box(&token)).unwrap());
    });
}

fn bench_login(c: &mut Criterion) {
    let tokens = Arc::new(TokenAuthenticator::new("bench-secret", 72));
    let svc = AuthService::new(Arc::new(MockAuthRepository::default()), tokens);

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput { email: "bench@example.com".into(), password: "Benchmark1".into() }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            rt.block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() }))
                .unwrap()
        });
    });
}

fn bench_lifecycle(c: &mut Criterion) {
    let owner = Claims { subject_id: 7, role: Role::Customer };
    let pending = order::Model {
        id: 1,
        user_id: 7,
        service_id: 1,
        status: OrderStatus::Pending,
        created_at: chrono::Utc::now().into(),
    };

    c.bench_function("lifecycle_owner_cancel", |b| {
        b.iter(|| OrderLifecycle::transition(black_box(&pending), OrderStatus::Cancelled, &owner).unwrap());
    });
}

criterion_group!(benches, bench_token_verify, bench_login, bench_lifecycle);
criterion_main!(benches);
