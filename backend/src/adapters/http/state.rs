//! Shared application state.
//!
//! Holds one `Arc` per port plus the runtime policy, and builds the
//! per-operation handlers on demand. Cloned for each request.

use std::sync::Arc;

use crate::application::handlers::admin::{
    DashboardStatsHandler, GetUserHandler, ListUsersHandler, UpdateUserHandler,
};
use crate::application::handlers::auth::{
    GetCurrentAccountHandler, LoginHandler, SignupHandler, SignupPolicy,
};
use crate::application::handlers::payment::{
    ApprovePaymentHandler, ListMyPaymentsHandler, ListPaymentsHandler, RejectPaymentHandler,
    SubmitPaymentHandler,
};
use crate::application::handlers::profile::{
    CompleteOnboardingHandler, GetProfileHandler, UpdateProfileHandler,
};
use crate::application::handlers::program::{
    CheckProgramAccessHandler, CreateProgramHandler, GetProgramHandler, ListEnrollmentsHandler,
    ListProgramsHandler, UpdateProgramHandler,
};
use crate::application::handlers::referral::ReferralOverviewHandler;
use crate::application::handlers::social::{
    CancelFriendRequestHandler, FriendActivityHandler, ListFriendRequestsHandler,
    ListFriendsHandler, RemoveFriendHandler, RespondFriendRequestHandler,
    SendFriendRequestHandler,
};
use crate::application::handlers::tracking::{
    DeleteWeightHandler, DeleteWorkoutHandler, GetWorkoutHandler, ListWeightsHandler,
    ListWorkoutsHandler, LogWeightHandler, LogWorkoutHandler, WeightSummaryHandler,
    WorkoutStatsHandler,
};
use crate::application::handlers::wallet::{
    AdjustWalletHandler, ApproveWithdrawalHandler, GetWalletHandler, ListMyWithdrawalsHandler,
    ListTransactionsHandler, ListWithdrawalsHandler, RejectWithdrawalHandler,
    RequestWithdrawalHandler,
};
use crate::config::AppConfig;
use crate::domain::foundation::{Money, ValidationError};
use crate::ports::{
    AccountRepository, AdminReader, EnrollmentReader, FriendshipRepository, PasswordHasher,
    PaymentRepository, ProfileRepository, ProgramRepository, ReferralRepository,
    SessionValidator, TokenIssuer, WalletRepository, WeightRepository, WorkoutRepository,
};

/// Business settings taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    pub signup: SignupPolicy,
    pub cashback_percent: u8,
    pub min_withdrawal: Money,
    pub verbose_errors: bool,
}

impl Policy {
    pub fn from_config(config: &AppConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            signup: SignupPolicy {
                allow_signup: config.features.allow_signup,
                signup_bonus: Money::from_cents(config.rewards.signup_bonus_cents)?,
            },
            cashback_percent: config.rewards.payment_cashback_percent,
            min_withdrawal: Money::from_cents(config.rewards.min_withdrawal_cents)?,
            verbose_errors: config.features.verbose_errors,
        })
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            signup: SignupPolicy {
                allow_signup: true,
                signup_bonus: Money::ZERO,
            },
            cashback_percent: 10,
            min_withdrawal: Money::ZERO,
            verbose_errors: false,
        }
    }
}

/// Every persistence port, implemented by a single store.
pub trait Store:
    AccountRepository
    + ProfileRepository
    + WeightRepository
    + WorkoutRepository
    + ProgramRepository
    + EnrollmentReader
    + PaymentRepository
    + WalletRepository
    + ReferralRepository
    + FriendshipRepository
    + AdminReader
    + 'static
{
}

impl<T> Store for T where
    T: AccountRepository
        + ProfileRepository
        + WeightRepository
        + WorkoutRepository
        + ProgramRepository
        + EnrollmentReader
        + PaymentRepository
        + WalletRepository
        + ReferralRepository
        + FriendshipRepository
        + AdminReader
        + 'static
{
}

/// Credential services shared by auth routes and the middleware.
#[derive(Clone)]
pub struct Credentials {
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub sessions: Arc<dyn SessionValidator>,
}

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub weights: Arc<dyn WeightRepository>,
    pub workouts: Arc<dyn WorkoutRepository>,
    pub programs: Arc<dyn ProgramRepository>,
    pub enrollments: Arc<dyn EnrollmentReader>,
    pub payments: Arc<dyn PaymentRepository>,
    pub wallets: Arc<dyn WalletRepository>,
    pub referrals: Arc<dyn ReferralRepository>,
    pub friendships: Arc<dyn FriendshipRepository>,
    pub admin: Arc<dyn AdminReader>,
    pub credentials: Credentials,
    pub policy: Policy,
}

impl AppState {
    /// Wires every port to the same store.
    pub fn new<S: Store>(store: Arc<S>, credentials: Credentials, policy: Policy) -> Self {
        Self {
            accounts: store.clone(),
            profiles: store.clone(),
            weights: store.clone(),
            workouts: store.clone(),
            programs: store.clone(),
            enrollments: store.clone(),
            payments: store.clone(),
            wallets: store.clone(),
            referrals: store.clone(),
            friendships: store.clone(),
            admin: store,
            credentials,
            policy,
        }
    }

    // Auth

    pub fn signup_handler(&self) -> SignupHandler {
        SignupHandler::new(
            self.accounts.clone(),
            self.credentials.hasher.clone(),
            self.credentials.tokens.clone(),
            self.policy.signup,
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.accounts.clone(),
            self.credentials.hasher.clone(),
            self.credentials.tokens.clone(),
        )
    }

    pub fn current_account_handler(&self) -> GetCurrentAccountHandler {
        GetCurrentAccountHandler::new(self.accounts.clone())
    }

    // Profile

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.profiles.clone(), self.weights.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.profiles.clone(), self.weights.clone())
    }

    pub fn complete_onboarding_handler(&self) -> CompleteOnboardingHandler {
        CompleteOnboardingHandler::new(self.profiles.clone())
    }

    // Tracking

    pub fn log_weight_handler(&self) -> LogWeightHandler {
        LogWeightHandler::new(self.weights.clone())
    }

    pub fn list_weights_handler(&self) -> ListWeightsHandler {
        ListWeightsHandler::new(self.weights.clone())
    }

    pub fn delete_weight_handler(&self) -> DeleteWeightHandler {
        DeleteWeightHandler::new(self.weights.clone())
    }

    pub fn weight_summary_handler(&self) -> WeightSummaryHandler {
        WeightSummaryHandler::new(self.weights.clone(), self.profiles.clone())
    }

    pub fn log_workout_handler(&self) -> LogWorkoutHandler {
        LogWorkoutHandler::new(self.workouts.clone())
    }

    pub fn list_workouts_handler(&self) -> ListWorkoutsHandler {
        ListWorkoutsHandler::new(self.workouts.clone())
    }

    pub fn get_workout_handler(&self) -> GetWorkoutHandler {
        GetWorkoutHandler::new(self.workouts.clone())
    }

    pub fn delete_workout_handler(&self) -> DeleteWorkoutHandler {
        DeleteWorkoutHandler::new(self.workouts.clone())
    }

    pub fn workout_stats_handler(&self) -> WorkoutStatsHandler {
        WorkoutStatsHandler::new(self.workouts.clone())
    }

    // Programs

    pub fn list_programs_handler(&self) -> ListProgramsHandler {
        ListProgramsHandler::new(self.programs.clone())
    }

    pub fn get_program_handler(&self) -> GetProgramHandler {
        GetProgramHandler::new(self.programs.clone())
    }

    pub fn create_program_handler(&self) -> CreateProgramHandler {
        CreateProgramHandler::new(self.programs.clone())
    }

    pub fn update_program_handler(&self) -> UpdateProgramHandler {
        UpdateProgramHandler::new(self.programs.clone())
    }

    pub fn list_enrollments_handler(&self) -> ListEnrollmentsHandler {
        ListEnrollmentsHandler::new(self.enrollments.clone())
    }

    pub fn program_access_handler(&self) -> CheckProgramAccessHandler {
        CheckProgramAccessHandler::new(self.programs.clone(), self.enrollments.clone())
    }

    // Payments

    pub fn submit_payment_handler(&self) -> SubmitPaymentHandler {
        SubmitPaymentHandler::new(self.payments.clone(), self.programs.clone())
    }

    pub fn my_payments_handler(&self) -> ListMyPaymentsHandler {
        ListMyPaymentsHandler::new(self.payments.clone())
    }

    pub fn list_payments_handler(&self) -> ListPaymentsHandler {
        ListPaymentsHandler::new(self.payments.clone())
    }

    pub fn approve_payment_handler(&self) -> ApprovePaymentHandler {
        ApprovePaymentHandler::new(
            self.payments.clone(),
            self.programs.clone(),
            self.enrollments.clone(),
            self.referrals.clone(),
            self.policy.cashback_percent,
        )
    }

    pub fn reject_payment_handler(&self) -> RejectPaymentHandler {
        RejectPaymentHandler::new(self.payments.clone())
    }

    // Wallet

    pub fn get_wallet_handler(&self) -> GetWalletHandler {
        GetWalletHandler::new(self.wallets.clone())
    }

    pub fn list_transactions_handler(&self) -> ListTransactionsHandler {
        ListTransactionsHandler::new(self.wallets.clone())
    }

    pub fn request_withdrawal_handler(&self) -> RequestWithdrawalHandler {
        RequestWithdrawalHandler::new(self.wallets.clone(), self.policy.min_withdrawal)
    }

    pub fn my_withdrawals_handler(&self) -> ListMyWithdrawalsHandler {
        ListMyWithdrawalsHandler::new(self.wallets.clone())
    }

    pub fn list_withdrawals_handler(&self) -> ListWithdrawalsHandler {
        ListWithdrawalsHandler::new(self.wallets.clone())
    }

    pub fn approve_withdrawal_handler(&self) -> ApproveWithdrawalHandler {
        ApproveWithdrawalHandler::new(self.wallets.clone())
    }

    pub fn reject_withdrawal_handler(&self) -> RejectWithdrawalHandler {
        RejectWithdrawalHandler::new(self.wallets.clone())
    }

    pub fn adjust_wallet_handler(&self) -> AdjustWalletHandler {
        AdjustWalletHandler::new(self.accounts.clone(), self.wallets.clone())
    }

    // Referrals

    pub fn referral_overview_handler(&self) -> ReferralOverviewHandler {
        ReferralOverviewHandler::new(
            self.accounts.clone(),
            self.referrals.clone(),
            self.wallets.clone(),
        )
    }

    // Friends

    pub fn send_friend_request_handler(&self) -> SendFriendRequestHandler {
        SendFriendRequestHandler::new(self.accounts.clone(), self.friendships.clone())
    }

    pub fn respond_friend_request_handler(&self) -> RespondFriendRequestHandler {
        RespondFriendRequestHandler::new(self.friendships.clone())
    }

    pub fn cancel_friend_request_handler(&self) -> CancelFriendRequestHandler {
        CancelFriendRequestHandler::new(self.friendships.clone())
    }

    pub fn remove_friend_handler(&self) -> RemoveFriendHandler {
        RemoveFriendHandler::new(self.friendships.clone())
    }

    pub fn list_friends_handler(&self) -> ListFriendsHandler {
        ListFriendsHandler::new(self.accounts.clone(), self.friendships.clone())
    }

    pub fn list_friend_requests_handler(&self) -> ListFriendRequestsHandler {
        ListFriendRequestsHandler::new(self.accounts.clone(), self.friendships.clone())
    }

    pub fn friend_activity_handler(&self) -> FriendActivityHandler {
        FriendActivityHandler::new(
            self.accounts.clone(),
            self.friendships.clone(),
            self.workouts.clone(),
        )
    }

    // Admin

    pub fn dashboard_stats_handler(&self) -> DashboardStatsHandler {
        DashboardStatsHandler::new(self.admin.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.accounts.clone())
    }

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(
            self.accounts.clone(),
            self.profiles.clone(),
            self.wallets.clone(),
        )
    }

    pub fn update_user_handler(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.accounts.clone())
    }
}
