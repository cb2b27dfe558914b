use crate::auth::application::use_cases::create_user::ICreateUserUseCase;
use crate::auth::application::use_cases::fetch_profile::FetchUserProfileUseCase;
use crate::auth::application::use_cases::login_user::ILoginUserUseCase;
use crate::auth::application::use_cases::soft_delete_user::ISoftDeleteUserUseCase;
use crate::modules::experience::application::controller as experience_controller;
use crate::modules::experience::application::domain::entities::ProfessionalExperience;
use crate::modules::experience::application::use_cases::current_experience::CurrentExperienceService;
use crate::modules::skill::application::controller as skill_controller;
use crate::modules::skill::application::domain::entities::Skill;
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::ports::outgoing::MediaStore;
use crate::shared::config::MediaUrls;
use crate::shared::crud::{ContextBuilder, RecordStore, SiteMeta, UrlReverser};
use crate::tests::support::memory_store::{InMemoryMediaStore, InMemoryStore};
use crate::tests::support::stubs::*;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    create_user: Arc<dyn ICreateUserUseCase + Send + Sync>,
    login_user: Arc<dyn ILoginUserUseCase + Send + Sync>,
    fetch_user_profile: Arc<dyn FetchUserProfileUseCase + Send + Sync>,
    soft_delete_user: Arc<dyn ISoftDeleteUserUseCase + Send + Sync>,
    skill_store: Arc<dyn RecordStore<Skill>>,
    experience_store: Arc<InMemoryStore<ProfessionalExperience>>,
    media_store: Arc<dyn MediaStore>,
    media_urls: MediaUrls,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            create_user: Arc::new(StubCreateUserUseCase),
            login_user: Arc::new(StubLoginUserUseCase),
            fetch_user_profile: Arc::new(StubFetchUserProfileUseCase),
            soft_delete_user: Arc::new(StubSoftDeleteUserUseCase),
            skill_store: Arc::new(InMemoryStore::<Skill>::new()),
            experience_store: Arc::new(InMemoryStore::<ProfessionalExperience>::new()),
            media_store: Arc::new(InMemoryMediaStore::new()),
            media_urls: MediaUrls::default(),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_create_user(mut self, uc: impl ICreateUserUseCase + Send + Sync + 'static) -> Self {
        self.create_user = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_fetch_user_profile(
        mut self,
        uc: impl FetchUserProfileUseCase + Send + Sync + 'static,
    ) -> Self {
        self.fetch_user_profile = Arc::new(uc);
        self
    }

    pub fn with_soft_delete_user(
        mut self,
        uc: impl ISoftDeleteUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.soft_delete_user = Arc::new(uc);
        self
    }

    pub fn with_skill_store(mut self, store: Arc<InMemoryStore<Skill>>) -> Self {
        self.skill_store = store;
        self
    }

    pub fn with_experience_store(
        mut self,
        store: Arc<InMemoryStore<ProfessionalExperience>>,
    ) -> Self {
        self.experience_store = store;
        self
    }

    pub fn with_media_store(mut self, store: Arc<InMemoryMediaStore>) -> Self {
        self.media_store = store;
        self
    }

    pub fn with_media_urls(mut self, media_urls: MediaUrls) -> Self {
        self.media_urls = media_urls;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let urls = Arc::new(experience_controller::register_routes(
            skill_controller::register_routes(UrlReverser::new()),
        ));
        let context = ContextBuilder::new(SiteMeta::default());

        let skills = skill_controller::build_controller(
            self.skill_store,
            context.clone(),
            Arc::clone(&urls),
        );
        let current_experience = CurrentExperienceService::new(self.experience_store.clone());
        let experiences = experience_controller::build_controller(
            self.experience_store,
            self.media_store,
            UploadPolicy::default(),
            &self.media_urls.media_url,
            context,
            urls,
        );

        web::Data::new(AppState {
            create_user_use_case: self.create_user,
            login_user_use_case: self.login_user,
            fetch_user_profile_use_case: self.fetch_user_profile,
            soft_delete_user_use_case: self.soft_delete_user,
            current_experience_use_case: Arc::new(current_experience),
            skills: Arc::new(skills),
            experiences: Arc::new(experiences),
            media_urls: self.media_urls,
        })
    }
}
