//! `CustodyApi` implementation.

use cl_01_evidence_store::KeyValueStore;
use shared_types::{CustodyEvent, CustodyEventKind, EvidenceRecord, NotificationName};
use tracing::{debug, info, warn};

use super::CustodyService;
use crate::domain::errors::CustodyError;
use crate::domain::transitions::{
    archive_description, invalidate_description, reactivate_description, transfer_description,
    Transition, CREATION_DESCRIPTION,
};
use crate::domain::validation::{evidence_key, require_non_empty, validate_content_hash};
use crate::ports::inbound::{
    CreateEvidenceRequest, CustodyApi, InvalidateEvidenceRequest, LifecycleRequest,
    TransferCustodyRequest,
};
use crate::ports::outbound::{NotificationSink, TransactionContext};

impl<KV, TX, NS> CustodyService<KV, TX, NS>
where
    KV: KeyValueStore,
    TX: TransactionContext,
    NS: NotificationSink,
{
    fn create(&mut self, request: CreateEvidenceRequest) -> Result<EvidenceRecord, CustodyError> {
        require_non_empty("caseId", &request.case_id)?;
        require_non_empty("evidenceId", &request.evidence_id)?;
        require_non_empty("contentId", &request.content_id)?;
        require_non_empty("contentHash", &request.content_hash)?;
        validate_content_hash(&request.content_hash)?;
        let key = evidence_key(&request.case_id, &request.evidence_id)?;

        if self.store.exists(&key)? {
            return Err(CustodyError::AlreadyExists {
                key: key.to_string(),
            });
        }

        let genesis = self.new_event(CustodyEventKind::Create, CREATION_DESCRIPTION.to_string());
        let record = EvidenceRecord::register(
            &key,
            request.content_id,
            request.content_hash,
            request.metadata,
            genesis,
        );
        self.persist_and_notify(&key, &record, NotificationName::EvidenceCreated)?;

        info!(
            case_id = %record.case_id,
            evidence_id = %record.evidence_id,
            tx_id = self.context.transaction_id(),
            custodian = %record.current_custodian,
            "[cl-02] Evidence created"
        );
        Ok(record)
    }

    fn transfer(
        &mut self,
        request: TransferCustodyRequest,
    ) -> Result<EvidenceRecord, CustodyError> {
        let (key, mut record) = self.prepare_transition(
            &request.case_id,
            &request.evidence_id,
            Transition::Transfer,
            |current| {
                transfer_description(
                    &current.current_custodian,
                    &request.new_custodian,
                    &request.reason,
                )
            },
        )?;
        let previous = std::mem::replace(&mut record.current_custodian, request.new_custodian);
        record.custodian_org = self.context.caller_org().to_string();

        self.persist_and_notify(&key, &record, Transition::Transfer.notification())?;

        info!(
            case_id = %record.case_id,
            evidence_id = %record.evidence_id,
            tx_id = self.context.transaction_id(),
            from = %previous,
            to = %record.current_custodian,
            "[cl-02] Custody transferred"
        );
        Ok(record)
    }

    fn lifecycle(
        &mut self,
        transition: Transition,
        case_id: &str,
        evidence_id: &str,
        describe: impl FnOnce(&EvidenceRecord) -> String,
    ) -> Result<EvidenceRecord, CustodyError> {
        let (key, record) = self.prepare_transition(case_id, evidence_id, transition, describe)?;
        self.persist_and_notify(&key, &record, transition.notification())?;

        info!(
            case_id = %record.case_id,
            evidence_id = %record.evidence_id,
            tx_id = self.context.transaction_id(),
            status = %record.status,
            log_len = record.custody_log.len(),
            "[cl-02] Status changed"
        );
        Ok(record)
    }
}

impl<KV, TX, NS> CustodyApi for CustodyService<KV, TX, NS>
where
    KV: KeyValueStore,
    TX: TransactionContext,
    NS: NotificationSink,
{
    fn create_evidence(
        &mut self,
        request: CreateEvidenceRequest,
    ) -> Result<EvidenceRecord, CustodyError> {
        self.create(request)
            .inspect_err(|e| self.log_rejection("CreateEvidence", e))
    }

    fn transfer_custody(
        &mut self,
        request: TransferCustodyRequest,
    ) -> Result<EvidenceRecord, CustodyError> {
        self.transfer(request)
            .inspect_err(|e| self.log_rejection("TransferCustody", e))
    }

    fn archive_to_cold(
        &mut self,
        request: LifecycleRequest,
    ) -> Result<EvidenceRecord, CustodyError> {
        let reason = request.reason;
        self.lifecycle(
            Transition::Archive,
            &request.case_id,
            &request.evidence_id,
            |_| archive_description(&reason),
        )
        .inspect_err(|e| self.log_rejection("ArchiveToCold", e))
    }

    fn reactivate_from_cold(
        &mut self,
        request: LifecycleRequest,
    ) -> Result<EvidenceRecord, CustodyError> {
        let reason = request.reason;
        self.lifecycle(
            Transition::Reactivate,
            &request.case_id,
            &request.evidence_id,
            |_| reactivate_description(&reason),
        )
        .inspect_err(|e| self.log_rejection("ReactivateFromCold", e))
    }

    fn invalidate_evidence(
        &mut self,
        request: InvalidateEvidenceRequest,
    ) -> Result<EvidenceRecord, CustodyError> {
        let description =
            invalidate_description(&request.reason, &request.disputed_transaction_ref);
        self.lifecycle(
            Transition::Invalidate,
            &request.case_id,
            &request.evidence_id,
            |_| description,
        )
        .inspect_err(|e| self.log_rejection("InvalidateEvidence", e))
    }

    fn get_evidence_summary(
        &self,
        case_id: &str,
        evidence_id: &str,
    ) -> Result<EvidenceRecord, CustodyError> {
        evidence_key(case_id, evidence_id)
            .and_then(|key| self.load_existing(&key))
            .inspect_err(|e| self.log_rejection("GetEvidenceSummary", e))
    }

    fn query_evidences_by_case(&self, case_id: &str) -> Result<Vec<EvidenceRecord>, CustodyError> {
        let mut scan = self
            .store
            .list_by_case(case_id)
            .map_err(CustodyError::from)
            .inspect_err(|e| self.log_rejection("QueryEvidencesByCase", e))?;

        let records = scan
            .by_ref()
            .collect::<Result<Vec<_>, _>>()
            .map_err(CustodyError::from)
            .inspect_err(|e| self.log_rejection("QueryEvidencesByCase", e))?;

        if scan.skipped() > 0 {
            warn!(
                case_id,
                skipped = scan.skipped(),
                "[cl-02] Case listing omitted undecodable records"
            );
        }
        debug!(case_id, count = records.len(), "[cl-02] Case listed");
        Ok(records)
    }

    fn get_custody_chain(
        &self,
        case_id: &str,
        evidence_id: &str,
    ) -> Result<Vec<CustodyEvent>, CustodyError> {
        evidence_key(case_id, evidence_id)
            .and_then(|key| self.load_existing(&key))
            .map(|record| record.custody_log)
            .inspect_err(|e| self.log_rejection("GetCustodyChain", e))
    }
}
