//! CMS `SignedData` construction (RFC 5652) with the CAdES/PAdES signed
//! attributes PDF signatures require, built from the `cms`/`der`/`x509-cert`
//! crate family rather than hand-pushed ASN.1 (see `pkcs7.rs`, which this
//! module supersedes).

use der::asn1::{OctetStringRef, SetOfVec};
use der::{Any, Decode, Encode, Sequence};
use x509_cert::attr::{Attribute, AttributeValue};
use x509_cert::Certificate as X509Certificate;

use cms::cert::CertificateChoices;
use cms::content_info::ContentInfo;
use cms::signed_data::{
    CertificateSet, CmsVersion, EncapsulatedContentInfo, SignatureValue, SignedAttributes,
    SignedData, SignerIdentifier, SignerInfo, SignerInfos,
};
use const_oid::ObjectIdentifier;
use spki::AlgorithmIdentifierOwned;

use crate::error::SignatureError;
use super::{Certificate, DigestAlgorithm, PrivateKey, SignatureResult};

const OID_DATA: &str = "1.2.840.113549.1.7.1";
const OID_SIGNED_DATA: &str = "1.2.840.113549.1.7.2";
const OID_CONTENT_TYPE: &str = "1.2.840.113549.1.9.3";
const OID_MESSAGE_DIGEST: &str = "1.2.840.113549.1.9.4";
const OID_SIGNING_TIME: &str = "1.2.840.113549.1.9.5";
const OID_SIGNING_CERTIFICATE: &str = "1.2.840.113549.1.9.16.2.12";
const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";

/// `ESSCertID`, RFC 2634 §5.4.1. Its certificate hash is fixed at SHA-1 by
/// the v1 attribute's definition, independent of the document's own message
/// digest algorithm; CAdES implementations that need a different cert-hash
/// algorithm use `SigningCertificateV2` (RFC 5035) instead, which this
/// module does not build.
#[derive(Debug, Clone, Sequence)]
struct EssCertId {
    cert_hash: der::asn1::OctetString,
}

/// `SigningCertificate`, RFC 2634 §5.4. Policy constraints are never
/// populated here; PDF signers don't assert signature policies.
#[derive(Debug, Clone, Sequence)]
struct SigningCertificate {
    certs: Vec<EssCertId>,
}

/// Inputs to a single CMS `SignedData` build: the signer's key material and
/// the caller-computed document digest (already excluding the `/Contents`
/// hole, per [`super::PendingSignature::digest`]).
pub struct CmsSigningRequest<'a> {
    pub certificate: &'a Certificate,
    pub chain: &'a [Certificate],
    pub private_key: &'a PrivateKey,
    pub digest_algorithm: DigestAlgorithm,
    pub document_digest: &'a [u8],
    /// UTC signing time; omitted entirely when `None` (PAdES forbids it).
    pub signing_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// An RFC 3161 timestamp token to attach as an unsigned attribute, already
/// fetched from a timestamper.
pub struct UnsignedTimestamp {
    pub der_bytes: Vec<u8>,
}

fn oid(s: &str) -> ObjectIdentifier {
    ObjectIdentifier::new_unwrap(s)
}

fn digest_algorithm_identifier(alg: DigestAlgorithm) -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: oid(alg.oid()),
        parameters: Some(Any::from(der::asn1::Null)),
    }
}

fn signature_algorithm_identifier(key: &PrivateKey) -> SignatureResult<AlgorithmIdentifierOwned> {
    use super::certificate::KeyType;
    match key.key_type() {
        KeyType::Rsa => Ok(AlgorithmIdentifierOwned {
            oid: oid(OID_RSA_ENCRYPTION),
            parameters: Some(Any::from(der::asn1::Null)),
        }),
        KeyType::EcdsaP256 => Ok(AlgorithmIdentifierOwned {
            oid: oid(OID_EC_PUBLIC_KEY),
            parameters: None,
        }),
    }
}

fn encode_attribute_value<T: Encode>(value: &T) -> SignatureResult<AttributeValue> {
    let der = value
        .to_der()
        .map_err(|e| SignatureError::Pkcs7Error(format!("attribute DER encode failed: {}", e)))?;
    let any = Any::from_der(&der)
        .map_err(|e| SignatureError::Pkcs7Error(format!("attribute re-decode failed: {}", e)))?;
    let mut values = SetOfVec::new();
    values
        .insert(any)
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;
    Ok(values)
}

fn build_signing_certificate_attribute(cert: &Certificate) -> SignatureResult<Attribute> {
    use sha1::{Digest, Sha1};
    let hash = Sha1::digest(cert.der_bytes());
    let cert_hash = der::asn1::OctetString::new(hash.to_vec())
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;
    let signing_cert = SigningCertificate {
        certs: vec![EssCertId { cert_hash }],
    };
    Ok(Attribute {
        oid: oid(OID_SIGNING_CERTIFICATE),
        values: encode_attribute_value(&signing_cert)?,
    })
}

fn build_message_digest_attribute(digest: &[u8]) -> SignatureResult<Attribute> {
    let octets = OctetStringRef::new(digest)
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;
    Ok(Attribute {
        oid: oid(OID_MESSAGE_DIGEST),
        values: encode_attribute_value(&octets)?,
    })
}

fn build_content_type_attribute() -> SignatureResult<Attribute> {
    Ok(Attribute {
        oid: oid(OID_CONTENT_TYPE),
        values: encode_attribute_value(&oid(OID_DATA))?,
    })
}

fn build_signing_time_attribute(time: chrono::DateTime<chrono::Utc>) -> SignatureResult<Attribute> {
    let generalized = der::asn1::GeneralizedTime::from_date_time(der::DateTime::new(
        time.year() as u16,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    )
    .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?);
    Ok(Attribute {
        oid: oid(OID_SIGNING_TIME),
        values: encode_attribute_value(&generalized)?,
    })
}

use chrono::{Datelike, Timelike};

/// Builds a complete CMS `ContentInfo` (type `signed-data`) DER encoding.
///
/// Signed attributes are assembled in the order the PAdES/CAdES profile
/// expects (content-type, message-digest, signing-certificate, then
/// signing-time when requested), DER-encoded as a `SET OF Attribute`, and
/// hashed/signed as the `SignerInfo`'s `signed_attrs`. The private key signs
/// the DER encoding of that attribute set, not the raw document digest.
///
/// `fetch_timestamp`, if given, is called with the freshly computed
/// signature bytes (not a digest of them -- it hashes internally) and
/// should return a complete RFC 3161 token DER encoding to attach as the
/// unsigned `signature-time-stamp-token` attribute. Called after the
/// signature is produced and before the `SignerInfo` is assembled, so
/// timestamping never requires re-signing the signed attributes.
pub fn build_signed_data(
    request: &CmsSigningRequest,
    fetch_timestamp: Option<&dyn Fn(&[u8]) -> SignatureResult<UnsignedTimestamp>>,
) -> SignatureResult<Vec<u8>> {
    let mut attrs = vec![
        build_content_type_attribute()?,
        build_message_digest_attribute(request.document_digest)?,
        build_signing_certificate_attribute(request.certificate)?,
    ];
    if let Some(time) = request.signing_time {
        attrs.push(build_signing_time_attribute(time)?);
    }

    let mut attr_set: SetOfVec<Attribute> = SetOfVec::new();
    for attr in attrs {
        attr_set
            .insert(attr)
            .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;
    }

    // The signature covers the DER encoding of the signed-attribute SET,
    // using its natural SET OF tag -- not the `[0]` IMPLICIT tag `SignedData`
    // uses when it embeds the same attributes in the `SignerInfo`.
    let to_sign = attr_set
        .to_der()
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;
    let signed_attrs = SignedAttributes::from(attr_set);
    let signature_bytes = request
        .private_key
        .sign_with_digest(&to_sign, request.digest_algorithm)?;

    let mut unsigned_attrs: Option<SetOfVec<Attribute>> = None;
    if let Some(fetch) = fetch_timestamp {
        let token = fetch(&signature_bytes)?;
        let attr = build_timestamp_token_attribute(&token)?;
        let mut set = SetOfVec::new();
        set.insert(attr)
            .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;
        unsigned_attrs = Some(set);
    }

    let signer_info = SignerInfo {
        // CmsVersion::V1: the signer is identified by issuer-and-serial,
        // per RFC 5652 §5.3.
        version: CmsVersion::V1,
        sid: issuer_and_serial_sid(request.certificate)?,
        digest_alg: digest_algorithm_identifier(request.digest_algorithm),
        signed_attrs: Some(signed_attrs),
        signature_algorithm: signature_algorithm_identifier(request.private_key)?,
        signature: SignatureValue::new(&signature_bytes)
            .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?,
        unsigned_attrs,
    };

    let mut signer_infos = SignerInfos::default();
    signer_infos
        .0
        .insert(signer_info)
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;

    let mut digest_algorithms = der::asn1::SetOfVec::new();
    digest_algorithms
        .insert(digest_algorithm_identifier(request.digest_algorithm))
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;

    let mut certificates = CertificateSet::default();
    certificates
        .0
        .insert(CertificateChoices::Certificate(decode_certificate(
            request.certificate,
        )?))
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;
    for extra in request.chain {
        certificates
            .0
            .insert(CertificateChoices::Certificate(decode_certificate(extra)?))
            .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;
    }

    let signed_data = SignedData {
        // CmsVersion::V1: no attribute certificates and the encapsulated
        // content type is plain `id-data`.
        version: CmsVersion::V1,
        digest_algorithms,
        encap_content_info: EncapsulatedContentInfo {
            econtent_type: oid(OID_DATA),
            econtent: None,
        },
        certificates: Some(certificates),
        crls: None,
        signer_infos,
    };

    let content = signed_data
        .to_der()
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;

    let content_info = ContentInfo {
        content_type: oid(OID_SIGNED_DATA),
        content: Any::from_der(&content)
            .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?,
    };

    content_info
        .to_der()
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))
}

fn decode_certificate(cert: &Certificate) -> SignatureResult<X509Certificate> {
    X509Certificate::from_der(cert.der_bytes())
        .map_err(|e| SignatureError::CertificateLoadFailed(e.to_string()))
}

fn issuer_and_serial_sid(cert: &Certificate) -> SignatureResult<SignerIdentifier> {
    let parsed = decode_certificate(cert)?;
    Ok(SignerIdentifier::IssuerAndSerialNumber(
        cms::cert::IssuerAndSerialNumber {
            issuer: parsed.tbs_certificate.issuer,
            serial_number: parsed.tbs_certificate.serial_number,
        },
    ))
}

const OID_SIGNATURE_TIME_STAMP_TOKEN: &str = "1.2.840.113549.1.9.16.2.14";

fn build_timestamp_token_attribute(ts: &UnsignedTimestamp) -> SignatureResult<Attribute> {
    let any = Any::from_der(&ts.der_bytes)
        .map_err(|e| SignatureError::Pkcs7Error(format!("invalid timestamp token DER: {}", e)))?;
    let mut values = SetOfVec::new();
    values
        .insert(any)
        .map_err(|e| SignatureError::Pkcs7Error(e.to_string()))?;
    Ok(Attribute {
        oid: oid(OID_SIGNATURE_TIME_STAMP_TOKEN),
        values,
    })
}
