use shared::{
    Allocation, AllocationStatusResponse, CreateAllocationRequest, CreateAllocationResponse,
    PaymentMethod, PortfolioSummary, WithdrawResponse, WithdrawalCountdown,
};

use crate::domain::accrual::WithdrawalCountdown as DomainCountdown;
use crate::domain::commands::allocation::{
    AllocationEvaluation, CreateAllocationCommand, CreateAllocationResult,
    PortfolioSummary as DomainPortfolioSummary, WithdrawResult,
};
use crate::domain::models::allocation::Allocation as DomainAllocation;
use crate::domain::models::payment::PaymentDetails;

pub struct AllocationMapper;

impl AllocationMapper {
    pub fn payment_to_domain(dto: PaymentMethod) -> PaymentDetails {
        match dto {
            PaymentMethod::MobileMoney { provider, phone_number } => {
                PaymentDetails::MobileMoney { provider, phone_number }
            }
            PaymentMethod::PayPal { email } => PaymentDetails::PayPal { email },
            PaymentMethod::Crypto { address } => PaymentDetails::Crypto { address },
        }
    }

    pub fn payment_to_dto(domain: PaymentDetails) -> PaymentMethod {
        match domain {
            PaymentDetails::MobileMoney { provider, phone_number } => {
                PaymentMethod::MobileMoney { provider, phone_number }
            }
            PaymentDetails::PayPal { email } => PaymentMethod::PayPal { email },
            PaymentDetails::Crypto { address } => PaymentMethod::Crypto { address },
        }
    }

    /// Convert a domain allocation to its DTO, timestamps as RFC 3339
    pub fn to_dto(domain: DomainAllocation) -> Allocation {
        Allocation {
            id: domain.id,
            user_id: domain.user_id,
            product_id: domain.product_id,
            allocation_date: domain.allocation_date.to_rfc3339(),
            total_paid: domain.total_paid,
            payment_method: Self::payment_to_dto(domain.payment_method),
            daily_revenue: domain.daily_revenue,
            total_revenue: domain.total_revenue,
            can_withdraw: domain.can_withdraw,
            withdrawn_at: domain.withdrawn_at.map(|at| at.to_rfc3339()),
        }
    }

    pub fn to_dto_list(domain: Vec<DomainAllocation>) -> Vec<Allocation> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    /// `None` means the allocation has already been withdrawn
    pub fn countdown_to_dto(domain: Option<DomainCountdown>) -> WithdrawalCountdown {
        match domain {
            None => WithdrawalCountdown::Withdrawn,
            Some(DomainCountdown::EligibleNow) => WithdrawalCountdown::EligibleNow,
            Some(DomainCountdown::Remaining { days, hours, minutes }) => {
                WithdrawalCountdown::Remaining { days, hours, minutes }
            }
        }
    }

    pub fn to_create_command(request: CreateAllocationRequest) -> CreateAllocationCommand {
        CreateAllocationCommand {
            user_id: request.user_id,
            product_id: request.product_id,
            payment_method: Self::payment_to_domain(request.payment_method),
        }
    }

    pub fn to_create_response(result: CreateAllocationResult) -> CreateAllocationResponse {
        CreateAllocationResponse {
            allocation: Self::to_dto(result.allocation),
            success_message: result.success_message,
        }
    }

    pub fn to_status_response(evaluation: AllocationEvaluation) -> AllocationStatusResponse {
        let countdown = Self::countdown_to_dto(evaluation.countdown);
        AllocationStatusResponse {
            allocation: Self::to_dto(evaluation.allocation),
            elapsed_days: evaluation.snapshot.elapsed_days,
            countdown_label: countdown.to_string(),
            countdown,
        }
    }

    pub fn to_withdraw_response(result: WithdrawResult) -> WithdrawResponse {
        WithdrawResponse {
            allocation: Self::to_dto(result.allocation),
            amount_withdrawn: result.amount_withdrawn,
            success_message: result.success_message,
        }
    }

    pub fn summary_to_dto(domain: DomainPortfolioSummary) -> PortfolioSummary {
        PortfolioSummary {
            allocation_count: domain.allocation_count,
            total_allocated: domain.total_allocated,
            total_revenue: domain.total_revenue,
        }
    }
}
