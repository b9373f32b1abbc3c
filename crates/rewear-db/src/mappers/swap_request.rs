//! Swap request model -> entity mappers

use rewear_core::entities::{
    Item, RequestWithItem, RequestWithRequester, SwapRequest, UserSummary,
};
use rewear_core::error::DomainError;
use rewear_core::value_objects::{ItemId, SwapRequestId, UserId};

use crate::models::{SwapRequestJoinModel, SwapRequestModel};

use super::corrupt_row;

impl TryFrom<SwapRequestModel> for SwapRequest {
    type Error = DomainError;

    fn try_from(model: SwapRequestModel) -> Result<Self, Self::Error> {
        Ok(SwapRequest {
            id: SwapRequestId::new(model.id),
            item_id: ItemId::new(model.item_id),
            requester_id: UserId::new(model.requester_id),
            status: model
                .status
                .parse()
                .map_err(|e| corrupt_row("swap_requests", e))?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl SwapRequestJoinModel {
    fn split(self) -> Result<(SwapRequest, Item, UserSummary), DomainError> {
        let request = SwapRequest::try_from(SwapRequestModel {
            id: self.request_id,
            item_id: self.item.id,
            requester_id: self.requester_id,
            status: self.request_status,
            created_at: self.request_created_at,
            updated_at: self.request_updated_at,
        })?;
        let item = Item::try_from(self.item)?;
        let party = UserSummary {
            id: UserId::new(self.party_id),
            name: self.party_name,
        };
        Ok((request, item, party))
    }
}

impl TryFrom<SwapRequestJoinModel> for RequestWithItem {
    type Error = DomainError;

    fn try_from(model: SwapRequestJoinModel) -> Result<Self, Self::Error> {
        let (request, item, uploader) = model.split()?;
        Ok(RequestWithItem {
            request,
            item,
            uploader,
        })
    }
}

impl TryFrom<SwapRequestJoinModel> for RequestWithRequester {
    type Error = DomainError;

    fn try_from(model: SwapRequestJoinModel) -> Result<Self, Self::Error> {
        let (request, item, requester) = model.split()?;
        Ok(RequestWithRequester {
            request,
            item,
            requester,
        })
    }
}
